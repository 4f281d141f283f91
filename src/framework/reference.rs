//! # Entity References
//!
//! An [`EntityRef`] lets a relationship attribute point at a persisted entity without
//! fetching it. It has two explicit states:
//!
//! - [`EntityRef::Unloaded`]: only the type and identity are known. Attributes written to
//!   it are kept aside as pending assignments.
//! - [`EntityRef::Loaded`]: the full record is present.
//!
//! Nothing loads implicitly. [`EntityRef::resolve`] is the only bridge between the two
//! states: it asks a [`ReferenceResolver`] for the record and overlays the pending
//! assignments on top of it.

use crate::framework::core::Hydratable;
use crate::framework::error::{HydrationError, Result};
use crate::framework::record::Record;
use crate::framework::schema::TypeSchema;
use crate::framework::value::Value;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// Identity-only or fully loaded stand-in for a persisted entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRef {
    /// Type and identity only; writes are kept in `assigned` until [`EntityRef::resolve`].
    Unloaded {
        schema: &'static TypeSchema,
        id: Box<Value>,
        assigned: BTreeMap<String, Value>,
    },
    /// Record data held in memory.
    ///
    /// This is either a record fetched by [`EntityRef::resolve`], or an embedded object
    /// written into a relationship slot without an identity. The latter keeps the schema
    /// of the object it came from (for example a transfer type) and was never fetched.
    Loaded(Record),
}

impl EntityRef {
    pub fn unloaded(schema: &'static TypeSchema, id: impl Into<Value>) -> Self {
        EntityRef::Unloaded {
            schema,
            id: Box::new(id.into()),
            assigned: BTreeMap::new(),
        }
    }

    pub fn loaded(record: Record) -> Self {
        EntityRef::Loaded(record)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, EntityRef::Loaded(_))
    }

    pub fn id(&self) -> Option<&Value> {
        match self {
            EntityRef::Unloaded { id, assigned, .. } => assigned.get("id").or(Some(&**id)),
            EntityRef::Loaded(record) => record.id(),
        }
    }

    /// Value assigned to `attribute`, without loading anything.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        match self {
            EntityRef::Unloaded { assigned, .. } => assigned.get(attribute),
            EntityRef::Loaded(record) => record.get(attribute),
        }
    }

    /// Loads the record behind an unloaded reference.
    ///
    /// Assignments made while unloaded win over the stored values. A loaded reference
    /// is returned unchanged.
    pub fn resolve(self, resolver: &dyn ReferenceResolver) -> Result<EntityRef> {
        match self {
            EntityRef::Loaded(_) => Ok(self),
            EntityRef::Unloaded {
                schema,
                id,
                assigned,
            } => {
                let mut record = resolver.find(schema, &id)?.ok_or_else(|| HydrationError::NotFound {
                    entity: schema.name.to_string(),
                    id: id.to_string(),
                })?;
                for (attribute, value) in assigned {
                    record.write(&attribute, value)?;
                }
                tracing::debug!(entity_type = schema.name, %id, "Reference resolved");
                Ok(EntityRef::Loaded(record))
            }
        }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Unloaded { schema, id, .. } => write!(f, "{}#{} (unloaded)", schema.name, id),
            EntityRef::Loaded(record) => match record.id() {
                Some(id) => write!(f, "{}#{}", record.type_name(), id),
                None => write!(f, "{} (new)", record.type_name()),
            },
        }
    }
}

impl Hydratable for EntityRef {
    fn schema(&self) -> &'static TypeSchema {
        match self {
            EntityRef::Unloaded { schema, .. } => *schema,
            EntityRef::Loaded(record) => record.schema(),
        }
    }

    /// Reading an unloaded reference only sees its identity and pending assignments.
    fn read(&self, attribute: &str) -> Result<Value> {
        match self {
            EntityRef::Loaded(record) => record.read(attribute),
            EntityRef::Unloaded {
                schema,
                id,
                assigned,
            } => {
                if let Some(value) = assigned.get(attribute) {
                    return Ok(value.clone());
                }
                if attribute == "id" {
                    return Ok((**id).clone());
                }
                let reason = if schema.has_attribute(attribute) {
                    "reference is not loaded"
                } else {
                    "attribute is not declared"
                };
                Err(HydrationError::attribute_access(schema.name, attribute, reason))
            }
        }
    }

    fn write(&mut self, attribute: &str, value: Value) -> Result<()> {
        match self {
            EntityRef::Loaded(record) => record.write(attribute, value),
            EntityRef::Unloaded {
                schema, assigned, ..
            } => {
                if !schema.has_attribute(attribute) {
                    return Err(HydrationError::attribute_access(
                        schema.name,
                        attribute,
                        "attribute is not declared",
                    ));
                }
                assigned.insert(attribute.to_string(), value);
                Ok(())
            }
        }
    }
}

/// The persistence layer as seen by the input copier.
///
/// # Provided Methods
/// [`get_reference`](ReferenceResolver::get_reference) hands out an
/// [`EntityRef::Unloaded`] without touching storage. Override it only to track or
/// validate reference creation.
pub trait ReferenceResolver: Send + Sync {
    /// Returns a lightweight reference to the record of `schema` identified by `id`.
    fn get_reference(&self, schema: &'static TypeSchema, id: Value) -> Result<EntityRef> {
        Ok(EntityRef::unloaded(schema, id))
    }

    /// Loads the full record, if it exists.
    fn find(&self, schema: &'static TypeSchema, id: &Value) -> Result<Option<Record>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::schema::AttributeSpec;
    use crate::framework::value::FieldValue;

    static ADDRESS: TypeSchema = TypeSchema::new(
        "Address",
        &[
            AttributeSpec::new("id"),
            AttributeSpec::new("street"),
            AttributeSpec::new("city"),
        ],
    );

    struct FixedResolver(Option<Record>);

    impl ReferenceResolver for FixedResolver {
        fn find(&self, _schema: &'static TypeSchema, _id: &Value) -> Result<Option<Record>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_unloaded_reference_keeps_assignments() {
        let mut reference = EntityRef::unloaded(&ADDRESS, 7i64);
        reference.write("city", Value::from("Lyon")).unwrap();

        assert!(!reference.is_loaded());
        assert_eq!(reference.id(), Some(&Value::Int(7)));
        assert_eq!(reference.read("city"), Ok(Value::from("Lyon")));
        assert!(matches!(
            reference.read("street"),
            Err(HydrationError::AttributeAccess { .. })
        ));
        assert!(reference.write("zip", Value::Null).is_err());
    }

    #[test]
    fn test_resolve_overlays_assignments() {
        let stored = Record::new(&ADDRESS)
            .with("id", 7i64)
            .with("street", "Rue Neuve")
            .with("city", "Paris");
        let mut reference = EntityRef::unloaded(&ADDRESS, 7i64);
        reference.write("city", Value::from("Lyon")).unwrap();

        let resolved = reference.resolve(&FixedResolver(Some(stored))).unwrap();

        assert!(resolved.is_loaded());
        assert_eq!(resolved.get("street"), Some(&Value::from("Rue Neuve")));
        assert_eq!(resolved.get("city"), Some(&Value::from("Lyon")));
    }

    #[test]
    fn test_reference_round_trips_through_value() {
        let mut reference = EntityRef::unloaded(&ADDRESS, 7i64);
        reference.write("city", Value::from("Lyon")).unwrap();

        let value = Value::from(reference.clone());
        assert_eq!(value.kind(), "reference");
        assert_eq!(EntityRef::from_value(value), Ok(reference));
    }

    #[test]
    fn test_embedded_object_is_stored_as_loaded() {
        let embedded = Record::new(&ADDRESS).with("city", "Lyon");
        let reference = EntityRef::from_value(Value::Object(embedded)).unwrap();

        assert!(reference.is_loaded());
        assert_eq!(reference.type_name(), "Address");
        assert_eq!(reference.id(), None);
        assert_eq!(reference.to_string(), "Address (new)");
    }

    #[test]
    fn test_resolve_missing_record() {
        let reference = EntityRef::unloaded(&ADDRESS, 8i64);
        let err = reference.resolve(&FixedResolver(None)).unwrap_err();
        assert_eq!(
            err,
            HydrationError::NotFound {
                entity: "Address".to_string(),
                id: "8".to_string()
            }
        );
    }
}
