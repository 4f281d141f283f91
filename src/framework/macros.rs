//! # Schema Declaration Macro
//!
//! [`hydratable!`](crate::hydratable) turns a plain struct into a [`Hydratable`](crate::framework::Hydratable)
//! type. For a struct `OrderItem` it generates:
//!
//! - `pub static ORDER_ITEM_SCHEMA: TypeSchema` listing the fields in order,
//! - `impl Hydratable for OrderItem`, dispatching `read`/`write` by field name,
//! - `impl FieldValue for OrderItem`, so the struct can be embedded in another one,
//! - `OrderItem::to_record` and `OrderItem::from_record`.
//!
//! Each field may carry serialization groups (`name: ["public"]`) and a relationship
//! marker (`=> single("Customer")` or `=> collection("OrderItem")`). The struct must
//! implement `Default`, and every field type must implement
//! [`FieldValue`](crate::framework::FieldValue).
//!
//! ```rust
//! use dto_hydrator::framework::{EntityRef, Hydratable, RelationKind, Value};
//! use dto_hydrator::hydratable;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! pub struct Ticket {
//!     pub id: i64,
//!     pub title: String,
//!     pub assignee: Option<EntityRef>,
//! }
//!
//! hydratable!(Ticket {
//!     id,
//!     title: ["public"],
//!     assignee => single("User"),
//! });
//!
//! let mut ticket = Ticket::default();
//! ticket.write("title", Value::from("Crash on start")).unwrap();
//!
//! assert_eq!(ticket.title, "Crash on start");
//! assert_eq!(TICKET_SCHEMA.relation_of("assignee"), RelationKind::Single);
//! assert!(ticket.write("title", Value::Int(1)).is_err());
//! ```

/// Implements [`Hydratable`](crate::framework::Hydratable) for a struct. See the
/// [module documentation](crate::framework::macros).
#[macro_export]
macro_rules! hydratable {
    ($ty:ident {
        $( $field:ident $( : $groups:expr )? $( => $relation:ident ( $target:literal ) )? ),* $(,)?
    }) => {
        $crate::paste::paste! {
            const [<$ty:snake:upper _ATTRIBUTES>]: &[$crate::framework::AttributeSpec] = &[
                $(
                    $crate::framework::AttributeSpec::new(stringify!($field))
                        $( .groups(&$groups) )?
                        $( .$relation($target) )?
                ),*
            ];

            #[doc = concat!("Schema of [`", stringify!($ty), "`].")]
            pub static [<$ty:snake:upper _SCHEMA>]: $crate::framework::TypeSchema =
                $crate::framework::TypeSchema::new(stringify!($ty), [<$ty:snake:upper _ATTRIBUTES>]);

            impl $crate::framework::Hydratable for $ty {
                fn schema(&self) -> &'static $crate::framework::TypeSchema {
                    &[<$ty:snake:upper _SCHEMA>]
                }

                fn read(&self, attribute: &str) -> $crate::framework::Result<$crate::framework::Value> {
                    $(
                        if attribute == stringify!($field) {
                            return Ok($crate::framework::FieldValue::to_value(&self.$field));
                        }
                    )*
                    Err($crate::framework::HydrationError::attribute_access(
                        stringify!($ty),
                        attribute,
                        "attribute is not declared",
                    ))
                }

                fn write(
                    &mut self,
                    attribute: &str,
                    value: $crate::framework::Value,
                ) -> $crate::framework::Result<()> {
                    $(
                        if attribute == stringify!($field) {
                            self.$field = $crate::framework::FieldValue::from_value(value).map_err(
                                |reason| $crate::framework::HydrationError::attribute_access(
                                    stringify!($ty),
                                    attribute,
                                    reason,
                                ),
                            )?;
                            return Ok(());
                        }
                    )*
                    let _ = value;
                    Err($crate::framework::HydrationError::attribute_access(
                        stringify!($ty),
                        attribute,
                        "attribute is not declared",
                    ))
                }
            }
        }

        impl $ty {
            /// Snapshot of every field as a dynamic record.
            pub fn to_record(&self) -> $crate::framework::Record {
                let mut record = $crate::framework::Record::new(
                    $crate::framework::Hydratable::schema(self),
                );
                $(
                    record = record.with(
                        stringify!($field),
                        $crate::framework::FieldValue::to_value(&self.$field),
                    );
                )*
                record
            }

            /// Builds the struct from the attributes `record` shares with it.
            ///
            /// Attributes the record's type does not declare keep their default value.
            pub fn from_record(record: &$crate::framework::Record) -> $crate::framework::Result<Self> {
                let mut value = Self::default();
                let source = $crate::framework::Hydratable::schema(record);
                $(
                    if source.has_attribute(stringify!($field)) {
                        let current = $crate::framework::Hydratable::read(record, stringify!($field))?;
                        $crate::framework::Hydratable::write(&mut value, stringify!($field), current)?;
                    }
                )*
                Ok(value)
            }
        }

        impl $crate::framework::FieldValue for $ty {
            fn to_value(&self) -> $crate::framework::Value {
                $crate::framework::Value::Object(self.to_record())
            }

            fn from_value(value: $crate::framework::Value) -> ::std::result::Result<Self, String> {
                let record: $crate::framework::Record =
                    $crate::framework::FieldValue::from_value(value)?;
                Self::from_record(&record).map_err(|e| e.to_string())
            }
        }
    };
}
