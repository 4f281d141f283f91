//! Wiring and observability.
//!
//! - [`HydratorBundle`] - builds the copier singletons and the factory around one
//!   resolver, one request stack and one schema registry
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod bundle;
pub mod tracing;

pub use self::bundle::*;
pub use self::tracing::*;
