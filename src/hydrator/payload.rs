//! # Request Payloads
//!
//! The input copier decides which attributes to touch from the submitted request body.
//! [`Payload`] keeps the submitted keys in order; each value is a [`PayloadValue`]:
//! a scalar, a nested mapping, or a sequence.
//!
//! The payload of the request being handled comes from a [`PayloadSource`]. The
//! [`RequestStack`] implementation keeps a stack of payloads (sub-requests push on
//! top of the main one) and always exposes the top entry.

use crate::framework::error::{HydrationError, Result};
use std::sync::{PoisonError, RwLock};

/// A submitted value.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Scalar(serde_json::Value),
    Mapping(Payload),
    Sequence(Vec<PayloadValue>),
}

impl PayloadValue {
    /// A value counts as submitted unless it is JSON `null`.
    pub fn is_present(&self) -> bool {
        !matches!(self, PayloadValue::Scalar(serde_json::Value::Null))
    }

    pub fn as_mapping(&self) -> Option<&Payload> {
        match self {
            PayloadValue::Mapping(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => PayloadValue::Mapping(Payload {
                entries: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            }),
            serde_json::Value::Array(items) => {
                PayloadValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            scalar => PayloadValue::Scalar(scalar),
        }
    }
}

impl From<Payload> for PayloadValue {
    fn from(payload: Payload) -> Self {
        PayloadValue::Mapping(payload)
    }
}

/// Ordered mapping from attribute name to submitted value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(String, PayloadValue)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON request body. The top level must be an object.
    pub fn from_json_str(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Self::from_json(value)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match PayloadValue::from(value) {
            PayloadValue::Mapping(payload) => Ok(payload),
            other => Err(HydrationError::InvalidPayload(format!(
                "expected an object at the top level, got {:?}",
                other
            ))),
        }
    }

    /// Builder-style insertion; an existing key keeps its position and takes the new value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PayloadValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The submitted `id`, if present and not `null`.
    pub fn identity(&self) -> Option<&PayloadValue> {
        self.get("id").filter(|id| id.is_present())
    }

    /// A copy of this payload without its `id` key.
    pub fn without_identity(&self) -> Payload {
        Payload {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| k != "id")
                .cloned()
                .collect(),
        }
    }
}

/// Exposes the payload of the request currently being handled.
pub trait PayloadSource: Send + Sync {
    fn current(&self) -> Option<Payload>;
}

/// Stack of request payloads; the top entry is the current request.
#[derive(Debug, Default)]
pub struct RequestStack {
    requests: RwLock<Vec<Payload>>,
}

impl RequestStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, payload: Payload) {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payload);
    }

    pub fn pop(&self) -> Option<Payload> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    pub fn depth(&self) -> usize {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl PayloadSource for RequestStack {
    fn current(&self) -> Option<Payload> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}
