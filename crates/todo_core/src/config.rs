//! Core configuration for the to-do list controller.
//!
//! # Responsibility
//! - Carry the storage key and persistence worker settings explicitly.
//! - Validate the storage key before any storage access.
//!
//! # Invariants
//! - A `StorageKey` is never empty and never longer than `MAX_KEY_CHARS`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the `@todoApp` list slot.
pub const DEFAULT_STORAGE_KEY: &str = "@todoApp:todoList";
const DEFAULT_WORKER_NAME: &str = "todo-persistence";
const MAX_KEY_CHARS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyKey,
    KeyTooLong { chars: usize, max: usize },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "storage key cannot be empty"),
            Self::KeyTooLong { chars, max } => {
                write!(f, "storage key has {chars} chars; maximum is {max}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Validated name of the key-value slot holding the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        let chars = key.chars().count();
        if chars > MAX_KEY_CHARS {
            return Err(ConfigError::KeyTooLong {
                chars,
                max: MAX_KEY_CHARS,
            });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(DEFAULT_STORAGE_KEY.to_string())
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings for `ListController::open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Slot the list is stored under.
    pub storage_key: StorageKey,
    /// Name of the persistence worker thread.
    pub worker_name: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            storage_key: StorageKey::default(),
            worker_name: DEFAULT_WORKER_NAME.to_string(),
        }
    }
}

impl TodoConfig {
    /// Default settings with a custom storage key.
    pub fn with_key(key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            storage_key: StorageKey::new(key)?,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StorageKey, TodoConfig, DEFAULT_STORAGE_KEY};

    #[test]
    fn default_config_uses_legacy_key() {
        let config = TodoConfig::default();
        assert_eq!(config.storage_key.as_str(), DEFAULT_STORAGE_KEY);
        assert_eq!(config.worker_name, "todo-persistence");
    }

    #[test]
    fn storage_key_rejects_empty_and_oversized_values() {
        assert_eq!(StorageKey::new(""), Err(ConfigError::EmptyKey));
        let err = StorageKey::new("k".repeat(300)).unwrap_err();
        assert!(matches!(err, ConfigError::KeyTooLong { chars: 300, .. }));
    }

    #[test]
    fn with_key_keeps_other_defaults() {
        let config = TodoConfig::with_key("work:list").unwrap();
        assert_eq!(config.storage_key.to_string(), "work:list");
        assert_eq!(config.worker_name, TodoConfig::default().worker_name);
    }
}
