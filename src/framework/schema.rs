//! # Type Schemas
//!
//! A [`TypeSchema`] is the static declaration a hydratable type makes about itself:
//! its attribute names in order, the serialization groups each attribute belongs to,
//! and, for entity relationships, the [`RelationKind`] and the name of the related type.
//!
//! Schemas are `'static` values built with `const fn`s, usually by the
//! [`hydratable!`](crate::hydratable) macro:
//!
//! ```rust
//! use dto_hydrator::framework::{AttributeSpec, RelationKind, TypeSchema};
//!
//! static ORDER: TypeSchema = TypeSchema::new(
//!     "Order",
//!     &[
//!         AttributeSpec::new("id"),
//!         AttributeSpec::new("note").groups(&["write"]),
//!         AttributeSpec::new("items").collection("OrderItem"),
//!     ],
//! );
//!
//! assert_eq!(ORDER.relation_of("items"), RelationKind::Collection);
//! assert_eq!(ORDER.relation_of("note"), RelationKind::None);
//! ```
//!
//! The [`SchemaRegistry`] maps type names back to schemas. The input copier uses it
//! to find the schema of the related type when it needs a reference.

use crate::framework::error::{HydrationError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// How an entity attribute points at other entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationKind {
    /// A plain value.
    #[default]
    None,
    /// Many-to-one: the attribute holds one related entity.
    Single,
    /// One-to-many: the attribute holds a list of related entities.
    Collection,
}

/// Declaration of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub groups: &'static [&'static str],
    pub relation: RelationKind,
    /// Name of the related type, for relationship attributes.
    pub target: Option<&'static str>,
}

impl AttributeSpec {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            groups: &[],
            relation: RelationKind::None,
            target: None,
        }
    }

    /// Tags the attribute as a member of the given serialization groups.
    pub const fn groups(self, groups: &'static [&'static str]) -> Self {
        Self { groups, ..self }
    }

    /// Marks the attribute as a many-to-one relationship to `target`.
    pub const fn single(self, target: &'static str) -> Self {
        Self {
            relation: RelationKind::Single,
            target: Some(target),
            ..self
        }
    }

    /// Marks the attribute as a one-to-many relationship to `target`.
    pub const fn collection(self, target: &'static str) -> Self {
        Self {
            relation: RelationKind::Collection,
            target: Some(target),
            ..self
        }
    }

    pub fn in_any_group(&self, groups: &BTreeSet<String>) -> bool {
        self.groups.iter().any(|group| groups.contains(*group))
    }
}

/// Static declaration of a hydratable type.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeSchema {
    pub name: &'static str,
    pub attributes: &'static [AttributeSpec],
}

impl TypeSchema {
    pub const fn new(name: &'static str, attributes: &'static [AttributeSpec]) -> Self {
        Self { name, attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Attribute names in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.iter().map(|spec| spec.name)
    }

    /// Relationship kind of `name`; undeclared attributes are [`RelationKind::None`].
    pub fn relation_of(&self, name: &str) -> RelationKind {
        self.attribute(name)
            .map(|spec| spec.relation)
            .unwrap_or_default()
    }

    /// Checks the group metadata: no blank group tags and no attribute declared twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in self.attributes {
            if !seen.insert(spec.name) {
                return Err(HydrationError::metadata(
                    self.name,
                    format!("attribute `{}` is declared more than once", spec.name),
                ));
            }
            if spec.groups.iter().any(|group| group.trim().is_empty()) {
                return Err(HydrationError::metadata(
                    self.name,
                    format!("attribute `{}` has a blank group tag", spec.name),
                ));
            }
        }
        Ok(())
    }
}

/// Lookup of schemas by type name.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, &'static TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(mut self, schema: &'static TypeSchema) -> Self {
        self.register(schema);
        self
    }

    pub fn register(&mut self, schema: &'static TypeSchema) -> &mut Self {
        if self.schemas.insert(schema.name, schema).is_some() {
            tracing::warn!(entity_type = schema.name, "Schema registered twice, keeping the latest");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&'static TypeSchema> {
        self.schemas.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema of the type `owner.attribute` points at.
    ///
    /// Fails with [`HydrationError::ReferenceResolution`] when the attribute is not a
    /// relationship, declares no target, or the target was never registered.
    pub fn related_schema(
        &self,
        owner: &TypeSchema,
        attribute: &str,
    ) -> Result<&'static TypeSchema> {
        let spec = owner.attribute(attribute).ok_or_else(|| {
            HydrationError::reference_resolution(owner.name, attribute, "attribute is not declared")
        })?;
        if spec.relation == RelationKind::None {
            return Err(HydrationError::reference_resolution(
                owner.name,
                attribute,
                "attribute is not a relationship",
            ));
        }
        let target = spec.target.ok_or_else(|| {
            HydrationError::reference_resolution(owner.name, attribute, "no related type declared")
        })?;
        self.get(target).ok_or_else(|| {
            HydrationError::reference_resolution(
                owner.name,
                attribute,
                format!("related type `{}` is not registered", target),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ADDRESS: TypeSchema = TypeSchema::new(
        "Address",
        &[AttributeSpec::new("id"), AttributeSpec::new("city")],
    );

    static CUSTOMER: TypeSchema = TypeSchema::new(
        "Customer",
        &[
            AttributeSpec::new("id"),
            AttributeSpec::new("name").groups(&["public"]),
            AttributeSpec::new("address").single("Address"),
            AttributeSpec::new("orders").collection("Order"),
            AttributeSpec {
                name: "legacy",
                groups: &[],
                relation: RelationKind::Single,
                target: None,
            },
        ],
    );

    static BROKEN: TypeSchema = TypeSchema::new(
        "Broken",
        &[AttributeSpec::new("id"), AttributeSpec::new("id")],
    );

    static BLANK_GROUP: TypeSchema = TypeSchema::new(
        "BlankGroup",
        &[AttributeSpec::new("name").groups(&["public", " "])],
    );

    #[test]
    fn test_relation_lookup() {
        assert_eq!(CUSTOMER.relation_of("address"), RelationKind::Single);
        assert_eq!(CUSTOMER.relation_of("orders"), RelationKind::Collection);
        assert_eq!(CUSTOMER.relation_of("name"), RelationKind::None);
        assert_eq!(CUSTOMER.relation_of("missing"), RelationKind::None);
        assert_eq!(
            CUSTOMER.attribute_names().collect::<Vec<_>>(),
            vec!["id", "name", "address", "orders", "legacy"]
        );
    }

    #[test]
    fn test_related_schema() {
        let registry = SchemaRegistry::new().with(&ADDRESS).with(&CUSTOMER);

        let related = registry.related_schema(&CUSTOMER, "address").unwrap();
        assert_eq!(related.name, "Address");

        // Not a relationship
        assert!(matches!(
            registry.related_schema(&CUSTOMER, "name"),
            Err(HydrationError::ReferenceResolution { .. })
        ));
        // Relationship without a target
        assert!(matches!(
            registry.related_schema(&CUSTOMER, "legacy"),
            Err(HydrationError::ReferenceResolution { .. })
        ));
        // Target never registered
        assert!(matches!(
            registry.related_schema(&CUSTOMER, "orders"),
            Err(HydrationError::ReferenceResolution { .. })
        ));
    }

    #[test]
    fn test_validate_metadata() {
        assert!(CUSTOMER.validate().is_ok());
        assert!(matches!(BROKEN.validate(), Err(HydrationError::Metadata { .. })));
        assert!(matches!(BLANK_GROUP.validate(), Err(HydrationError::Metadata { .. })));
    }
}
