#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # DTO Hydrator
//!
//! > **Copy fields between transfer objects and persisted entities without writing the copy code.**
//!
//! An API rarely accepts or returns exactly the shape it stores. This crate moves
//! attribute values between the two shapes: from an entity into a transfer object on
//! the way out, and from a submitted transfer object into an entity on the way in,
//! turning embedded sub-objects that carry an `id` into lightweight references to the
//! related entities.
//!
//! ## 🏗️ Design
//!
//! ### Schemas instead of reflection
//! Every participating type implements [`Hydratable`](framework::Hydratable): it exposes a
//! static [`TypeSchema`](framework::TypeSchema) (attribute names, serialization groups,
//! relationship kinds) and reads/writes attributes as dynamic
//! [`Value`](framework::Value)s. The [`hydratable!`] macro writes that impl for a plain struct.
//!
//! ### The payload decides
//! The input copier only touches attributes that were actually submitted. The request
//! body is parsed into a [`Payload`](hydrator::Payload) whose values are a tagged
//! variant (`Scalar | Mapping | Sequence`), so relationship handling is a `match`.
//!
//! ### Explicit references
//! A relationship slot receives an [`EntityRef`](framework::EntityRef): `Unloaded` (type
//! and id only) or `Loaded` (full record). Nothing is fetched until the caller calls
//! [`EntityRef::resolve`](framework::EntityRef::resolve).
//!
//! ### Synchronous and stateless
//! A `hydrate` call runs to completion on the calling thread. The copiers hold no per-call
//! state, so the two singletons can be shared across threads.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! [`Hydratable`](framework::Hydratable), schemas, values, records, references and the
//! [`ReferenceResolver`](framework::ReferenceResolver) seam to persistence.
//!
//! ### 2. The Copiers ([`hydrator`])
//! [`Hydrator`](hydrator::Hydrator) (entity → transfer object) and
//! [`Dehydrator`](hydrator::Dehydrator) (transfer object → entity), with the
//! [`AttributeLister`](hydrator::AttributeLister) and the
//! [`HydrationContext`](hydrator::HydrationContext) they share.
//!
//! ### 3. The Lookup ([`factory`])
//! [`CopierFactory::make`](factory::CopierFactory::make) returns a copier singleton by kind tag.
//!
//! ### 4. The Wiring ([`lifecycle`])
//! [`HydratorBundle`](lifecycle::HydratorBundle) builds everything once; [`lifecycle::setup_tracing`]
//! installs logging.
//!
//! ### 5. The Sample Domain ([`domain`])
//! Customers, addresses, orders and their transfer objects.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use dto_hydrator::domain::{self, Order, OrderInput};
//! use dto_hydrator::framework::mock::InMemoryStore;
//! use dto_hydrator::hydrator::{HydrationContext, Payload};
//! use dto_hydrator::lifecycle::HydratorBundle;
//! use std::sync::Arc;
//!
//! let bundle = HydratorBundle::new(domain::registry(), Arc::new(InMemoryStore::new()));
//!
//! let body = r#"{"reference": "A-1", "customer": {"id": 3, "name": "Alice"}}"#;
//! let input: OrderInput = serde_json::from_str(body).unwrap();
//! let payload = Payload::from_json_str(body).unwrap();
//!
//! let mut order = Order::default();
//! bundle
//!     .dehydrator()
//!     .hydrate_with_payload(&input, &mut order, &payload, &HydrationContext::default())
//!     .unwrap();
//!
//! assert_eq!(order.reference, "A-1");
//! let customer = order.customer.unwrap();
//! assert!(!customer.is_loaded());
//! assert_eq!(customer.get("name"), Some(&"Alice".into()));
//! ```
//!
//! ## 🧪 Testing
//!
//! See [`framework::mock`] for an in-memory resolver that counts references and loads.

pub mod domain;
pub mod factory;
pub mod framework;
pub mod hydrator;
pub mod lifecycle;

#[doc(hidden)]
pub use paste;

pub use factory::{CopierFactory, CopierKind};
pub use framework::{EntityRef, HydrationError, Hydratable, Result};
pub use hydrator::{Copier, Dehydrator, HydrationContext, Hydrator, Payload};
pub use lifecycle::HydratorBundle;
