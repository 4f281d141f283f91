//! Customers and their postal addresses.

use crate::framework::EntityRef;
use crate::hydratable;
use serde::{Deserialize, Serialize};

/// A persisted postal address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub city: String,
}

hydratable!(Address { id, street, city });

/// A persisted customer.
///
/// `address` is a many-to-one relationship to [`Address`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<EntityRef>,
}

hydratable!(Customer {
    id,
    name,
    email,
    address => single("Address"),
});

impl Customer {
    /// Creates a new Customer without an address.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            address: None,
        }
    }
}

/// Submitted address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressInput {
    pub id: i64,
    pub street: String,
    pub city: String,
}

hydratable!(AddressInput {
    id,
    street: ["write"],
    city: ["write"],
});

/// Submitted customer, possibly with an embedded address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInput {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<AddressInput>,
}

hydratable!(CustomerInput {
    id,
    name: ["write"],
    email: ["write"],
    address: ["write"],
});

/// Customer as returned to API clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: i64,
    pub name: String,
    pub email: String,
}

hydratable!(CustomerView {
    id: ["public", "detail"],
    name: ["public", "detail"],
    email: ["detail"],
});
