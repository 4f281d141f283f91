//! Per-call configuration.

use crate::framework::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Options recognized by every copier.
///
/// The only option is `groups`: when it holds at least one name, attribute discovery
/// on the scoped side is restricted to attributes tagged with one of those groups.
/// Unknown keys are ignored when parsing.
///
/// ```rust
/// use dto_hydrator::hydrator::HydrationContext;
///
/// let context = HydrationContext::from_json_str(r#"{"groups": ["public"]}"#).unwrap();
/// assert!(context.groups().unwrap().contains("public"));
///
/// assert!(HydrationContext::default().groups().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    groups: Option<BTreeSet<String>>,
}

impl HydrationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: Some(groups.into_iter().map(Into::into).collect()),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The requested groups, or `None` when no (or an empty) group filter was given.
    pub fn groups(&self) -> Option<&BTreeSet<String>> {
        self.groups.as_ref().filter(|groups| !groups.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_groups_mean_no_filter() {
        assert!(HydrationContext::with_groups(Vec::<String>::new()).groups().is_none());
        assert!(HydrationContext::from_json_str("{}").unwrap().groups().is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let context =
            HydrationContext::from_json_str(r#"{"groups": ["a", "b"], "enable_max_depth": true}"#)
                .unwrap();
        assert_eq!(context, HydrationContext::with_groups(["b", "a"]));
    }

    #[test]
    fn test_malformed_context() {
        assert!(HydrationContext::from_json_str(r#"{"groups": "a"}"#).is_err());
    }
}
