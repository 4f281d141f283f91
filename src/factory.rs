//! # Copier Factory
//!
//! Hands out the two copier singletons by kind tag. The factory builds nothing itself:
//! both copiers are created once by the wiring layer
//! ([`HydratorBundle`](crate::lifecycle::HydratorBundle)) and injected.

use crate::framework::error::{HydrationError, Result};
use crate::hydrator::{Copier, Dehydrator, Hydrator};
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

/// The copier kinds the factory knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopierKind {
    /// Entity → transfer object.
    Hydrator,
    /// Transfer object → entity.
    Dehydrator,
}

impl CopierKind {
    pub fn tag(&self) -> &'static str {
        match self {
            CopierKind::Hydrator => "hydrator",
            CopierKind::Dehydrator => "dehydrator",
        }
    }
}

impl Display for CopierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CopierKind {
    type Err = HydrationError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "hydrator" => Ok(CopierKind::Hydrator),
            "dehydrator" => Ok(CopierKind::Dehydrator),
            other => Err(HydrationError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Table lookup from kind tag to copier singleton.
#[derive(Debug, Clone)]
pub struct CopierFactory {
    hydrator: Arc<Hydrator>,
    dehydrator: Arc<Dehydrator>,
}

impl CopierFactory {
    pub fn new(hydrator: Arc<Hydrator>, dehydrator: Arc<Dehydrator>) -> Self {
        Self {
            hydrator,
            dehydrator,
        }
    }

    /// Returns the copier registered under `kind`.
    ///
    /// # Errors
    /// [`HydrationError::UnsupportedKind`] for any tag other than `"hydrator"` and
    /// `"dehydrator"`.
    pub fn make(&self, kind: &str) -> Result<Arc<dyn Copier>> {
        let kind = kind.parse::<CopierKind>().inspect_err(|e| {
            tracing::warn!(error = %e, "Unsupported copier kind");
        })?;
        Ok(self.make_kind(kind))
    }

    pub fn make_kind(&self, kind: CopierKind) -> Arc<dyn Copier> {
        match kind {
            CopierKind::Hydrator => self.hydrator.clone() as Arc<dyn Copier>,
            CopierKind::Dehydrator => self.dehydrator.clone() as Arc<dyn Copier>,
        }
    }

    pub fn hydrator(&self) -> Arc<Hydrator> {
        self.hydrator.clone()
    }

    pub fn dehydrator(&self) -> Arc<Dehydrator> {
        self.dehydrator.clone()
    }
}
