//! # Core Abstraction
//!
//! This module defines the single trait every participating type implements.
//!
//! ## Key Types
//!
//! - [`Hydratable`]: uniform introspection and attribute access for transfer objects,
//!   entities, dynamic [`Record`](crate::framework::Record)s and
//!   [`EntityRef`](crate::framework::EntityRef)s.

use crate::framework::error::Result;
use crate::framework::schema::TypeSchema;
use crate::framework::value::Value;
use std::fmt::Debug;

/// Trait that any object must implement to take part in hydration.
///
/// # Architecture Note
/// The copiers never know the concrete types they work on. They ask an object for its
/// [`TypeSchema`] to discover attributes and relationships, then move [`Value`]s through
/// [`read`](Hydratable::read) and [`write`](Hydratable::write). This lets one copier
/// implementation serve every transfer/entity pair, and lets the input copier recurse
/// from a typed struct into a reference to a related entity.
///
/// Most types get this impl from the [`hydratable!`](crate::hydratable) macro.
///
/// # Errors
/// Both accessors fail with
/// [`HydrationError::AttributeAccess`](crate::framework::HydrationError::AttributeAccess)
/// when the attribute is not declared, or when a written value has the wrong shape
/// for the field.
pub trait Hydratable: Debug {
    /// The static declaration of this object's type.
    fn schema(&self) -> &'static TypeSchema;

    /// Reads the current value of `attribute`.
    fn read(&self, attribute: &str) -> Result<Value>;

    /// Replaces the value of `attribute`.
    fn write(&mut self, attribute: &str, value: Value) -> Result<()>;

    /// Name of this object's type, as declared in its schema.
    fn type_name(&self) -> &'static str {
        self.schema().name
    }
}
