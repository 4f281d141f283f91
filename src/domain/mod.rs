//! Sample domain: entities, the transfer objects submitted for them, and the views
//! returned to clients. Used by the demo binary and the integration tests.

pub mod customer;
pub mod order;

pub use customer::*;
pub use order::*;

use crate::framework::SchemaRegistry;

/// Registry of every entity that can be the target of a relationship.
pub fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with(&ADDRESS_SCHEMA)
        .with(&CUSTOMER_SCHEMA)
        .with(&ORDER_SCHEMA)
        .with(&ORDER_ITEM_SCHEMA)
}
