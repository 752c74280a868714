//! Persistent key/value settings
//!
//! A flat table of boolean and string values. [`FileSettings`] writes
//! through to `settings.toml` in the user's config directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::SettingsError;

/// Persisted edit-mode flag
pub const ENABLE_ACE: &str = "enable-ace";

/// Name of the active theme
pub const THEME: &str = "theme";

/// A stored setting value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl SettingValue {
    /// Parse operator input: "true"/"false" become booleans, anything else text
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "true" => SettingValue::Bool(true),
            "false" => SettingValue::Bool(false),
            other => SettingValue::Text(other.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            SettingValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// Key/value settings accessor
pub trait SettingsStore: Send {
    fn has(&self, key: &str) -> bool;

    fn get(&self, key: &str) -> Option<SettingValue>;

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError>;

    /// All entries in key order
    fn entries(&self) -> Vec<(String, SettingValue)>;

    /// Boolean value of `key`, false when missing or not a boolean
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// String value of `key`, if set to text
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }
}

/// Settings kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, SettingValue>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Volatile copy of another store, for dry runs
    pub fn snapshot_of(settings: &dyn SettingsStore) -> Self {
        Self {
            values: settings.entries().into_iter().collect(),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn entries(&self) -> Vec<(String, SettingValue)> {
        self.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Settings persisted as a TOML table
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
}

impl FileSettings {
    const FILE_NAME: &'static str = "settings.toml";

    /// Load from `settings.toml` inside `dir`; a missing file yields empty settings
    pub fn load_from(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(Self::FILE_NAME);
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        tracing::debug!("Setting {} = {}", key, value);
        self.values.insert(key.to_string(), value);
        self.save()
    }

    fn entries(&self) -> Vec<(String, SettingValue)> {
        self.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}
