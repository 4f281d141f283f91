//! # Hydration Errors
//!
//! Every failure raised while listing, reading, writing or resolving attributes is a
//! [`HydrationError`]. Nothing is recovered locally: the copiers propagate the first
//! error to the caller and leave the destination as it was at that point.

use thiserror::Error;

/// Errors that can occur while copying attributes between objects.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HydrationError {
    /// Group-based attribute discovery found malformed metadata.
    #[error("Metadata error on {type_name}: {message}")]
    Metadata { type_name: String, message: String },

    /// An attribute could not be read from or written to an object.
    #[error("Cannot access `{attribute}` on {type_name}: {reason}")]
    AttributeAccess {
        type_name: String,
        attribute: String,
        reason: String,
    },

    /// The related type (or identity) of a relationship attribute could not be determined.
    #[error("Cannot resolve reference for `{attribute}` on {type_name}: {reason}")]
    ReferenceResolution {
        type_name: String,
        attribute: String,
        reason: String,
    },

    /// The factory was asked for a copier kind it does not know.
    #[error("No copier registered for kind: {0}")]
    UnsupportedKind(String),

    /// The input copier ran without a current request payload.
    #[error("No current request payload")]
    MissingRequest,

    /// The request payload could not be interpreted.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A reference was resolved but its record does not exist.
    #[error("Entity not found: {entity} #{id}")]
    NotFound { entity: String, id: String },
}

impl HydrationError {
    pub fn metadata(type_name: &str, message: impl Into<String>) -> Self {
        Self::Metadata {
            type_name: type_name.to_string(),
            message: message.into(),
        }
    }

    pub fn attribute_access(type_name: &str, attribute: &str, reason: impl Into<String>) -> Self {
        Self::AttributeAccess {
            type_name: type_name.to_string(),
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }

    pub fn reference_resolution(
        type_name: &str,
        attribute: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::ReferenceResolution {
            type_name: type_name.to_string(),
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for HydrationError {
    fn from(e: serde_json::Error) -> Self {
        HydrationError::InvalidPayload(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HydrationError>;
