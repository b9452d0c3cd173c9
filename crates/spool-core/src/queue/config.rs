//! Queue configuration.

use serde::{Deserialize, Serialize};

use crate::error::SpoolError;

pub const DEFAULT_STORAGE_NAME: &str = "queue";

/// Construction-time settings for a `PersistentQueue`.
///
/// Missing fields take their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Name of the storage unit holding the durable record.
    pub storage_name: String,

    /// Persist immediately on `clear()`. Off by default: a cleared queue
    /// stays on storage until the next push, pop, save or processed item.
    pub persist_on_clear: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            storage_name: DEFAULT_STORAGE_NAME.to_string(),
            persist_on_clear: false,
        }
    }
}

impl QueueConfig {
    pub fn from_json(s: &str) -> Result<Self, SpoolError> {
        let config: Self = serde_json::from_str(s).map_err(|e| SpoolError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SpoolError> {
        validate_storage_name(&self.storage_name)
    }
}

/// Storage names become file names on most backends.
pub fn validate_storage_name(name: &str) -> Result<(), SpoolError> {
    let bad_char = |c: char| matches!(c, '/' | '\\' | '\0' | '\n' | '\r');
    if name.is_empty() || name == "." || name == ".." || name.contains(bad_char) {
        return Err(SpoolError::InvalidStorageName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults() {
        let config = QueueConfig::default();
        assert_eq!(config.storage_name, "queue");
        assert!(!config.persist_on_clear);
        config.validate().unwrap();
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(QueueConfig::from_json("{}").unwrap(), QueueConfig::default());
    }

    #[test]
    fn json_overrides() {
        let config =
            QueueConfig::from_json(r#"{"storage_name": "requests", "persist_on_clear": true}"#)
                .unwrap();
        assert_eq!(config.storage_name, "requests");
        assert!(config.persist_on_clear);
    }

    #[test]
    fn unknown_fields_are_config_errors() {
        let err = QueueConfig::from_json(r#"{"storage": "x"}"#).unwrap_err();
        assert!(matches!(err, SpoolError::Config(_)));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("a/b")]
    #[case("a\\b")]
    #[case("line\nbreak")]
    fn rejects_bad_storage_names(#[case] name: &str) {
        let err = validate_storage_name(name).unwrap_err();
        assert!(matches!(err, SpoolError::InvalidStorageName(n) if n == name));
    }

    #[test]
    fn invalid_name_in_json_is_rejected() {
        let err = QueueConfig::from_json(r#"{"storage_name": "../queue"}"#).unwrap_err();
        assert!(matches!(err, SpoolError::InvalidStorageName(_)));
    }
}
