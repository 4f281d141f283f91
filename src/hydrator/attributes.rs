//! Attribute discovery.

use crate::framework::error::Result;
use crate::framework::Hydratable;
use crate::hydrator::context::HydrationContext;

/// Lists the attributes of an object that are eligible for copying.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeLister;

impl AttributeLister {
    pub fn new() -> Self {
        Self
    }

    /// Attribute names of `object`, in declaration order.
    ///
    /// With a non-empty group filter in `context`, only attributes tagged with one of
    /// the requested groups are returned, after the schema's group metadata has been
    /// validated. Otherwise every declared attribute is returned.
    pub fn list(
        &self,
        object: &dyn Hydratable,
        context: &HydrationContext,
    ) -> Result<Vec<&'static str>> {
        let schema = object.schema();
        match context.groups() {
            Some(groups) => {
                schema.validate()?;
                Ok(schema
                    .attributes
                    .iter()
                    .filter(|spec| spec.in_any_group(groups))
                    .map(|spec| spec.name)
                    .collect())
            }
            None => Ok(schema.attribute_names().collect()),
        }
    }
}
