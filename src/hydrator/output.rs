//! Entity → transfer object copier.

use crate::factory::CopierKind;
use crate::framework::error::Result;
use crate::framework::Hydratable;
use crate::hydrator::attributes::AttributeLister;
use crate::hydrator::context::HydrationContext;
use crate::hydrator::Copier;
use tracing::{debug, instrument, trace};

/// Copies attributes from a persisted entity into a transfer object.
///
/// Every destination attribute the source also declares is read from the source and
/// written to the destination as-is. Relationships get no special treatment: a
/// reference on the entity is handed to the transfer object unchanged.
#[derive(Debug, Default)]
pub struct Hydrator {
    lister: AttributeLister,
}

impl Hydrator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Copier for Hydrator {
    fn kind(&self) -> CopierKind {
        CopierKind::Hydrator
    }

    #[instrument(skip_all, fields(source = source.type_name(), destination = destination.type_name()))]
    fn hydrate(
        &self,
        source: &dyn Hydratable,
        destination: &mut dyn Hydratable,
        context: &HydrationContext,
    ) -> Result<()> {
        let source_schema = source.schema();
        let mut copied = 0;
        for attribute in self.lister.list(&*destination, context)? {
            if !source_schema.has_attribute(attribute) {
                continue;
            }
            let value = source.read(attribute)?;
            trace!(attribute, %value, "Copy");
            destination.write(attribute, value)?;
            copied += 1;
        }
        debug!(copied, "Output hydration complete");
        Ok(())
    }
}
