//! Engine configuration
//!
//!     Configuration is plain serde data. Missing keys fall back to the defaults.
//!
//!         single_policy: overwrite   # or: reject
//!         cache_matches: true

use crate::walk::error::WalkResult;
use serde::{Deserialize, Serialize};

/// What a single-valued capture does when its tag already holds a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinglePolicy {
    /// Replace the stored value
    #[default]
    Overwrite,
    /// Leave the stored value and fail the capture
    Reject,
}

/// Settings for an [Engine](crate::walk::engine::Engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Repeat policy for single-valued tags
    pub single_policy: SinglePolicy,
    /// Memoize regex evaluation per `(pattern, value)` for the length of a run
    pub cache_matches: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            single_policy: SinglePolicy::Overwrite,
            cache_matches: true,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(source: &str) -> WalkResult<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> WalkResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_partial_config_uses_defaults() {
        let config = EngineConfig::from_yaml_str("single_policy: reject\n").unwrap();
        assert_eq!(config.single_policy, SinglePolicy::Reject);
        assert!(config.cache_matches);
    }

    #[test]
    fn test_json_config() {
        let config = EngineConfig::from_json_str(r#"{"cache_matches": false}"#).unwrap();
        assert_eq!(config.single_policy, SinglePolicy::Overwrite);
        assert!(!config.cache_matches);
    }

    #[test]
    fn test_unknown_policy_is_format_error() {
        let err = EngineConfig::from_yaml_str("single_policy: sometimes\n").unwrap_err();
        assert!(matches!(err, crate::walk::error::WalkError::Format(_)));
    }
}
