//! Popup configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tabstore_guard::RestrictionPolicy;
use tabstore_storage::StorageKind;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL prefixes of pages the popup must never touch
    pub restricted_prefixes: RestrictionPolicy,
    /// Kind shown when the popup opens
    pub initial_kind: StorageKind,
    /// Drop a render whose read finishes after a newer one started
    pub discard_stale_renders: bool,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn restriction_policy(&self) -> RestrictionPolicy {
        self.restricted_prefixes.clone()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            restricted_prefixes: RestrictionPolicy::default(),
            initial_kind: StorageKind::Local,
            discard_stale_renders: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.initial_kind, StorageKind::Local);
        assert!(config.discard_stale_renders);
        assert!(config.restriction_policy().is_restricted(Some("chrome://newtab")));
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(
            r#"{"restricted_prefixes": ["chrome://", "about:", "edge://", "brave://"]}"#,
        )
        .unwrap();

        assert_eq!(config.initial_kind, StorageKind::Local);
        assert!(config.restriction_policy().is_restricted(Some("brave://settings")));
    }

    #[test]
    fn test_blank_prefix_does_not_restrict_every_page() {
        let config =
            Config::from_json(r#"{"restricted_prefixes": ["chrome://", "", "chrome://"]}"#).unwrap();
        let policy = config.restriction_policy();

        assert_eq!(policy.prefixes(), ["chrome://"]);
        assert!(!policy.is_restricted(Some("https://example.com")));
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json(r#"{"initial_kind": "indexeddb"}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("tabstore-{}.json", uuid::Uuid::new_v4()));
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("tabstore-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"initial_kind": "cookies", "discard_stale_renders": false}"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.initial_kind, StorageKind::Cookies);
        assert!(!config.discard_stale_renders);
        assert_eq!(config.restricted_prefixes, RestrictionPolicy::default());
    }
}
