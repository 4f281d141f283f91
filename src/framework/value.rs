//! Dynamic attribute values and the conversions between them and typed fields.

use crate::framework::core::Hydratable;
use crate::framework::record::Record;
use crate::framework::reference::EntityRef;
use std::fmt::{self, Display};

/// A value read from or written to an attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    /// An embedded object (transfer sub-object or loaded entity data).
    Object(Record),
    /// A reference to a persisted entity.
    Reference(EntityRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Reference(_) => "reference",
        }
    }

    /// The embedded object, if this value can act as a hydration source or destination.
    pub fn as_hydratable(&self) -> Option<&dyn Hydratable> {
        match self {
            Value::Object(record) => Some(record),
            Value::Reference(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts a submitted identity into a value.
    ///
    /// Only scalars can identify a record; `null`, arrays and objects are rejected.
    pub fn from_identity(json: &serde_json::Value) -> Result<Value, String> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .ok_or_else(|| format!("unsupported identity number {}", n)),
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            other => Err(format!("identity must be a scalar, got {}", other)),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => write!(f, "[{} items]", items.len()),
            Value::Object(record) => write!(f, "{}{{..}}", record.type_name()),
            Value::Reference(reference) => write!(f, "{}", reference),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i64 => Int,
    i32 => Int,
    u32 => Int,
    f64 => Float,
    String => Text,
    &str => Text,
    Record => Object,
    EntityRef => Reference,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Conversion between a typed struct field and a [`Value`].
///
/// Conversions are strict: a value of another shape is refused with a reason, which the
/// caller turns into an attribute access error.
pub trait FieldValue: Sized {
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Result<Self, String>;
}

fn mismatch(expected: &str, value: &Value) -> String {
    format!("expected {}, got {}", expected, value.kind())
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, String> {
        Ok(value)
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl FieldValue for i32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Int(i) => i32::try_from(i).map_err(|e| e.to_string()),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl FieldValue for u32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Int(i) => u32::try_from(i).map_err(|e| e.to_string()),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl FieldValue for Record {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(record) | Value::Reference(EntityRef::Loaded(record)) => Ok(record),
            other => Err(mismatch("object", &other)),
        }
    }
}

impl FieldValue for EntityRef {
    fn to_value(&self) -> Value {
        Value::Reference(self.clone())
    }

    /// Embedded objects are kept as loaded data, so a transfer-side value that falls
    /// back into a relationship slot is stored as-is.
    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Reference(reference) => Ok(reference),
            Value::Object(record) => Ok(EntityRef::Loaded(record)),
            other => Err(mismatch("reference", &other)),
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions_are_strict() {
        assert_eq!(i64::from_value(Value::Int(4)), Ok(4));
        assert!(i64::from_value(Value::Text("4".into())).is_err());
        assert!(f64::from_value(Value::Int(4)).is_err());
        assert!(u32::from_value(Value::Int(-1)).is_err());
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
        assert_eq!(
            Vec::<i64>::from_value(Value::from(vec![1i64, 2])),
            Ok(vec![1, 2])
        );
    }

    #[test]
    fn test_identity_from_json() {
        assert_eq!(Value::from_identity(&serde_json::json!(7)), Ok(Value::Int(7)));
        assert_eq!(
            Value::from_identity(&serde_json::json!("abc")),
            Ok(Value::Text("abc".into()))
        );
        assert!(Value::from_identity(&serde_json::json!(null)).is_err());
        assert!(Value::from_identity(&serde_json::json!({"id": 1})).is_err());
    }
}
