//! Dynamic objects: a schema plus the attribute values assigned so far.

use crate::framework::core::Hydratable;
use crate::framework::error::{HydrationError, Result};
use crate::framework::schema::TypeSchema;
use crate::framework::value::Value;
use std::collections::BTreeMap;

/// A schema-checked bag of attribute values.
///
/// Records stand in for embedded objects once they leave their typed struct, and hold
/// the full data of a loaded entity. Declared attributes that were never assigned read
/// as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: &'static TypeSchema,
    values: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(schema: &'static TypeSchema) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style assignment. Undeclared attributes are dropped with a warning.
    pub fn with(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        if let Err(e) = self.write(attribute, value.into()) {
            tracing::warn!(entity_type = self.schema.name, error = %e, "Ignoring undeclared attribute");
        }
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }

    pub fn id(&self) -> Option<&Value> {
        self.get("id").filter(|id| !id.is_null())
    }

    /// Iterates over assigned attributes.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Hydratable for Record {
    fn schema(&self) -> &'static TypeSchema {
        self.schema
    }

    fn read(&self, attribute: &str) -> Result<Value> {
        if !self.schema.has_attribute(attribute) {
            return Err(HydrationError::attribute_access(
                self.schema.name,
                attribute,
                "attribute is not declared",
            ));
        }
        Ok(self.values.get(attribute).cloned().unwrap_or_default())
    }

    fn write(&mut self, attribute: &str, value: Value) -> Result<()> {
        if !self.schema.has_attribute(attribute) {
            return Err(HydrationError::attribute_access(
                self.schema.name,
                attribute,
                "attribute is not declared",
            ));
        }
        self.values.insert(attribute.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::schema::AttributeSpec;

    static ITEM: TypeSchema = TypeSchema::new(
        "Item",
        &[AttributeSpec::new("id"), AttributeSpec::new("qty")],
    );

    #[test]
    fn test_record_access() {
        let mut record = Record::new(&ITEM).with("id", 1i64);

        assert_eq!(record.read("id"), Ok(Value::Int(1)));
        assert_eq!(record.read("qty"), Ok(Value::Null));
        assert!(record.read("price").is_err());

        record.write("qty", Value::Int(3)).unwrap();
        assert_eq!(record.get("qty"), Some(&Value::Int(3)));

        let err = record.write("price", Value::Float(1.0)).unwrap_err();
        assert!(matches!(err, HydrationError::AttributeAccess { ref attribute, .. } if attribute == "price"));
    }

    #[test]
    fn test_builder_drops_undeclared() {
        let record = Record::new(&ITEM).with("id", 1i64).with("price", 2.5);
        assert_eq!(record.values().count(), 1);
        assert_eq!(record.id(), Some(&Value::Int(1)));
    }
}
