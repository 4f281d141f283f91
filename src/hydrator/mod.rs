//! The copiers and the pieces they share.
//!
//! - [`Hydrator`] - entity → transfer object
//! - [`Dehydrator`] - transfer object → entity, driven by the request payload
//! - [`AttributeLister`] - attribute discovery, optionally scoped to groups
//! - [`HydrationContext`] - per-call options
//! - [`Payload`] / [`RequestStack`] - submitted request bodies

pub mod attributes;
pub mod context;
pub mod input;
pub mod output;
pub mod payload;

pub use attributes::AttributeLister;
pub use context::HydrationContext;
pub use input::Dehydrator;
pub use output::Hydrator;
pub use payload::{Payload, PayloadSource, PayloadValue, RequestStack};

use crate::factory::CopierKind;
use crate::framework::error::Result;
use crate::framework::Hydratable;
use std::fmt::Debug;

/// Common contract of the two copiers.
///
/// Copiers hold no per-call state, so a single instance can serve concurrent calls.
pub trait Copier: Send + Sync + Debug {
    /// Which copier this is.
    fn kind(&self) -> CopierKind;

    /// Copies attributes from `source` into `destination`.
    fn hydrate(
        &self,
        source: &dyn Hydratable,
        destination: &mut dyn Hydratable,
        context: &HydrationContext,
    ) -> Result<()>;
}
