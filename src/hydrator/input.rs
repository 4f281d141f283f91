//! # Transfer Object → Entity Copier
//!
//! The [`Dehydrator`] writes a submitted transfer object onto a persisted entity. The
//! request payload decides which attributes are touched: an attribute is copied only if
//! it was submitted, is eligible on the transfer object (under the context's groups)
//! and is declared by the entity.
//!
//! ## Relationships
//!
//! For a relationship attribute the submitted sub-object is inspected:
//!
//! - it carries an `id`: the copier asks the [`ReferenceResolver`] for a reference to the
//!   related entity (nothing is loaded), then recurses to copy the embedded transfer
//!   object onto that reference, scoped to the remaining submitted keys;
//! - it has no `id`: the transfer-side value is written as-is.
//!
//! Collection entries are paired with the transfer object's elements by position.
//!
//! ```text
//! payload   {"items": [{"id": 1, "qty": 3}, {}]}
//! transfer  items = [Item{id: 1, qty: 3}, Item{id: 2, qty: 5}]
//! entity    items = [OrderItem#1 (unloaded, qty = 3), Item{id: 2, qty: 5}]
//! ```
//!
//! A failure aborts the call; attributes written before it stay written.

use crate::factory::CopierKind;
use crate::framework::error::{HydrationError, Result};
use crate::framework::{EntityRef, Hydratable, ReferenceResolver, RelationKind, SchemaRegistry, TypeSchema, Value};
use crate::hydrator::attributes::AttributeLister;
use crate::hydrator::context::HydrationContext;
use crate::hydrator::payload::{Payload, PayloadSource, PayloadValue};
use crate::hydrator::Copier;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Copies attributes from a transfer object into a persisted entity.
pub struct Dehydrator {
    resolver: Arc<dyn ReferenceResolver>,
    requests: Arc<dyn PayloadSource>,
    registry: Arc<SchemaRegistry>,
    lister: AttributeLister,
}

impl Dehydrator {
    pub fn new(
        resolver: Arc<dyn ReferenceResolver>,
        requests: Arc<dyn PayloadSource>,
        registry: Arc<SchemaRegistry>,
    ) -> Self {
        Self {
            resolver,
            requests,
            registry,
            lister: AttributeLister,
        }
    }

    /// Same as [`Copier::hydrate`], with an explicit payload instead of the current request.
    #[instrument(skip_all, fields(source = source.type_name(), destination = destination.type_name()))]
    pub fn hydrate_with_payload(
        &self,
        source: &dyn Hydratable,
        destination: &mut dyn Hydratable,
        payload: &Payload,
        context: &HydrationContext,
    ) -> Result<()> {
        self.hydrate_input(source, destination, payload, context)
    }

    fn hydrate_input(
        &self,
        source: &dyn Hydratable,
        destination: &mut dyn Hydratable,
        payload: &Payload,
        context: &HydrationContext,
    ) -> Result<()> {
        let source_attributes = self.lister.list(source, context)?;
        let destination_attributes = self.lister.list(&*destination, &HydrationContext::default())?;
        let attributes: Vec<&str> = payload
            .keys()
            .filter(|key| source_attributes.contains(key) && destination_attributes.contains(key))
            .collect();

        let owner = destination.schema();
        for attribute in attributes {
            let current = source.read(attribute)?;
            let value = match payload.get(attribute) {
                Some(requested) if requested.is_present() => match owner.relation_of(attribute) {
                    RelationKind::Collection => {
                        self.capture_collection(source, current, owner, requested, attribute, context)?
                    }
                    RelationKind::Single => {
                        match self.capture_reference(&current, owner, requested, attribute, context)? {
                            Some(reference) => Value::Reference(reference),
                            None => current,
                        }
                    }
                    RelationKind::None => current,
                },
                _ => current,
            };
            trace!(entity_type = owner.name, attribute, %value, "Write");
            destination.write(attribute, value)?;
        }
        Ok(())
    }

    /// Builds the new value of a collection attribute, one element per submitted entry.
    fn capture_collection(
        &self,
        source: &dyn Hydratable,
        current: Value,
        owner: &'static TypeSchema,
        requested: &PayloadValue,
        attribute: &str,
        context: &HydrationContext,
    ) -> Result<Value> {
        let entries = match requested {
            PayloadValue::Sequence(entries) if !entries.is_empty() => entries,
            _ => return Ok(current),
        };
        let elements = current.as_list().ok_or_else(|| {
            HydrationError::attribute_access(
                source.type_name(),
                attribute,
                format!("expected a list, got {}", current.kind()),
            )
        })?;

        let mut values = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let element = elements.get(index).ok_or_else(|| {
                HydrationError::attribute_access(
                    source.type_name(),
                    attribute,
                    format!("no element at index {}", index),
                )
            })?;
            let value = match self.capture_reference(element, owner, entry, attribute, context)? {
                Some(reference) => Value::Reference(reference),
                None => element.clone(),
            };
            values.push(value);
        }
        Ok(Value::List(values))
    }

    /// Returns a reference populated from `current` when `requested` carries an identity.
    fn capture_reference(
        &self,
        current: &Value,
        owner: &'static TypeSchema,
        requested: &PayloadValue,
        attribute: &str,
        context: &HydrationContext,
    ) -> Result<Option<EntityRef>> {
        let Some(sub_payload) = requested.as_mapping() else {
            return Ok(None);
        };
        let Some(identity) = sub_payload.identity() else {
            return Ok(None);
        };

        let target = self.registry.related_schema(owner, attribute)?;
        let id = match identity {
            PayloadValue::Scalar(json) => Value::from_identity(json),
            _ => Err("identity must be a scalar".to_string()),
        }
        .map_err(|reason| HydrationError::reference_resolution(owner.name, attribute, reason))?;
        let embedded = current.as_hydratable().ok_or_else(|| {
            HydrationError::attribute_access(
                owner.name,
                attribute,
                format!("expected an embedded object, got {}", current.kind()),
            )
        })?;

        debug!(entity_type = target.name, %id, attribute, "Capturing reference");
        let mut reference = self.resolver.get_reference(target, id)?;
        self.hydrate_input(embedded, &mut reference, &sub_payload.without_identity(), context)?;
        Ok(Some(reference))
    }
}

impl Copier for Dehydrator {
    fn kind(&self) -> CopierKind {
        CopierKind::Dehydrator
    }

    /// Uses the current request payload; fails with [`HydrationError::MissingRequest`]
    /// when there is none.
    #[instrument(skip_all, fields(source = source.type_name(), destination = destination.type_name()))]
    fn hydrate(
        &self,
        source: &dyn Hydratable,
        destination: &mut dyn Hydratable,
        context: &HydrationContext,
    ) -> Result<()> {
        let payload = self.requests.current().ok_or(HydrationError::MissingRequest)?;
        debug!(keys = payload.len(), "Input hydration");
        self.hydrate_input(source, destination, &payload, context)
    }
}

impl fmt::Debug for Dehydrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dehydrator")
            .field("registered_schemas", &self.registry.len())
            .finish_non_exhaustive()
    }
}
