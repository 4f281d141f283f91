//! Generic hydration framework.
//!
//! This module provides the building blocks every copier works on: the
//! [`Hydratable`] trait, static [`TypeSchema`]s, dynamic [`Value`]s and [`Record`]s,
//! two-state [`EntityRef`]s and the [`ReferenceResolver`] seam to persistence.
//!
//! # Main Components
//!
//! - [`Hydratable`] - Trait that transfer objects and entities implement
//! - [`TypeSchema`] / [`AttributeSpec`] - Static attribute, group and relationship declarations
//! - [`SchemaRegistry`] - Lookup of related types by name
//! - [`EntityRef`] / [`ReferenceResolver`] - Lightweight references and their resolution
//! - [`HydrationError`] - Common error type
//!
//! # Testing
//!
//! See [`mock`] for an in-memory resolver.

pub mod core;
pub mod error;
pub mod macros;
pub mod mock;
pub mod record;
pub mod reference;
pub mod schema;
pub mod value;

// Re-export core types for convenience
pub use self::core::Hydratable;
pub use error::{HydrationError, Result};
pub use record::Record;
pub use reference::{EntityRef, ReferenceResolver};
pub use schema::{AttributeSpec, RelationKind, SchemaRegistry, TypeSchema};
pub use value::{FieldValue, Value};
