//! # Mock Persistence
//!
//! An in-memory [`ReferenceResolver`] for tests and demos.
//!
//! [`InMemoryStore`] keeps records keyed by type name and identity, and counts how many
//! references it handed out and how many full loads it served. Tests use the counters to
//! check that hydration only ever creates references and never fetches a record behind
//! the caller's back.
//!
//! # Example
//! ```rust
//! use dto_hydrator::framework::mock::InMemoryStore;
//! use dto_hydrator::framework::{AttributeSpec, Record, ReferenceResolver, TypeSchema};
//!
//! static TAG: TypeSchema = TypeSchema::new("Tag", &[AttributeSpec::new("id"), AttributeSpec::new("label")]);
//!
//! let store = InMemoryStore::new();
//! store.insert(Record::new(&TAG).with("id", 1i64).with("label", "rust")).unwrap();
//!
//! let reference = store.get_reference(&TAG, 1i64.into()).unwrap();
//! assert_eq!(store.loads(), 0);
//!
//! let loaded = reference.resolve(&store).unwrap();
//! assert!(loaded.is_loaded());
//! assert_eq!(store.loads(), 1);
//! ```

use crate::framework::error::{HydrationError, Result};
use crate::framework::record::Record;
use crate::framework::reference::{EntityRef, ReferenceResolver};
use crate::framework::schema::TypeSchema;
use crate::framework::value::Value;
use crate::framework::Hydratable;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

type Key = (&'static str, String);

/// Thread-safe record store implementing [`ReferenceResolver`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<Key, Record>>,
    references: AtomicUsize,
    loads: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under its type and `id`, replacing any previous version.
    pub fn insert(&self, record: Record) -> Result<()> {
        let id = record.id().cloned().ok_or_else(|| {
            HydrationError::attribute_access(record.type_name(), "id", "record has no identity")
        })?;
        let key = (record.type_name(), id.to_string());
        tracing::debug!(entity_type = key.0, %id, "Stored");
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of references handed out so far.
    pub fn references_issued(&self) -> usize {
        self.references.load(Ordering::SeqCst)
    }

    /// Number of full record loads served so far.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ReferenceResolver for InMemoryStore {
    fn get_reference(&self, schema: &'static TypeSchema, id: Value) -> Result<EntityRef> {
        self.references.fetch_add(1, Ordering::SeqCst);
        tracing::trace!(entity_type = schema.name, %id, "Reference issued");
        Ok(EntityRef::unloaded(schema, id))
    }

    fn find(&self, schema: &'static TypeSchema, id: &Value) -> Result<Option<Record>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let record = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(schema.name, id.to_string()))
            .cloned();
        tracing::debug!(entity_type = schema.name, %id, found = record.is_some(), "Find");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::schema::AttributeSpec;

    static NOTE: TypeSchema = TypeSchema::new(
        "Note",
        &[AttributeSpec::new("id"), AttributeSpec::new("body")],
    );

    #[test]
    fn test_store_counts_references_and_loads() {
        let store = InMemoryStore::new();
        store
            .insert(Record::new(&NOTE).with("id", 1i64).with("body", "hello"))
            .unwrap();
        assert_eq!(store.len(), 1);

        let reference = store.get_reference(&NOTE, Value::Int(1)).unwrap();
        assert!(!reference.is_loaded());
        assert_eq!(store.references_issued(), 1);
        assert_eq!(store.loads(), 0);

        let found = store.find(&NOTE, &Value::Int(1)).unwrap();
        assert_eq!(found.and_then(|r| r.get("body").cloned()), Some(Value::from("hello")));
        assert_eq!(store.loads(), 1);

        assert_eq!(store.find(&NOTE, &Value::Int(2)).unwrap(), None);
    }

    #[test]
    fn test_insert_requires_identity() {
        let store = InMemoryStore::new();
        let err = store.insert(Record::new(&NOTE).with("body", "orphan")).unwrap_err();
        assert!(matches!(err, HydrationError::AttributeAccess { .. }));
        assert!(store.is_empty());
    }
}
