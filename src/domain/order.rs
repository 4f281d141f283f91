//! Orders and their line items.

use crate::domain::customer::{CustomerInput, CustomerView};
use crate::framework::EntityRef;
use crate::hydratable;
use serde::{Deserialize, Serialize};

/// A persisted order line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    pub sku: String,
    pub quantity: u32,
}

hydratable!(OrderItem { id, sku, quantity });

/// A persisted order.
///
/// # Relationships
/// - `customer`: many-to-one to [`Customer`](crate::domain::Customer)
/// - `items`: one-to-many to [`OrderItem`]
///
/// Relationship slots hold [`EntityRef`]s. After dehydration they are usually
/// unloaded references; call [`EntityRef::resolve`] to load them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: i64,
    pub reference: String,
    pub note: Option<String>,
    pub customer: Option<EntityRef>,
    pub items: Vec<EntityRef>,
}

hydratable!(Order {
    id,
    reference,
    note,
    customer => single("Customer"),
    items => collection("OrderItem"),
});

/// Submitted order line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItemInput {
    pub id: i64,
    pub sku: String,
    pub quantity: u32,
}

hydratable!(OrderItemInput {
    id,
    sku: ["write"],
    quantity: ["write"],
});

impl OrderItemInput {
    pub fn new(id: i64, sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            sku: sku.into(),
            quantity,
        }
    }
}

/// Submitted order.
///
/// `note` is only writable under the `admin` group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderInput {
    pub id: i64,
    pub reference: String,
    pub note: Option<String>,
    pub customer: Option<CustomerInput>,
    pub items: Vec<OrderItemInput>,
}

hydratable!(OrderInput {
    id,
    reference: ["write"],
    note: ["admin"],
    customer: ["write"],
    items: ["write"],
});

/// Order as returned to API clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: i64,
    pub reference: String,
    pub note: Option<String>,
    pub customer: Option<CustomerView>,
}

hydratable!(OrderView {
    id: ["public"],
    reference: ["public"],
    note,
    customer: ["public"],
});
