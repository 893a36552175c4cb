//! Process-wide preference store.
//!
//! Key → typed-scalar persistence, analogous to an editor's preference
//! registry. Keys are fixed strings owned by [`crate::settings`]; values
//! survive host restarts via the JSON-file backed [`FilePrefs`].

use crate::error::{AutosaveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single stored preference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
}

/// Key → scalar preference storage.
///
/// Reads return `None` for missing keys so callers can fall back to their
/// documented defaults. Writes take effect in memory immediately;
/// [`PrefStore::flush`] makes them durable.
pub trait PrefStore {
    /// Read an integer preference.
    fn get_int(&self, key: &str) -> Option<i64>;
    /// Read a boolean preference.
    fn get_bool(&self, key: &str) -> Option<bool>;
    /// Write an integer preference.
    fn set_int(&mut self, key: &str, value: i64);
    /// Write a boolean preference.
    fn set_bool(&mut self, key: &str, value: bool);
    /// Persist pending writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn flush(&mut self) -> Result<()>;
}

/// In-memory preference store for tests and hosts with their own registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrefs {
    values: BTreeMap<String, PrefValue>,
}

impl MemoryPrefs {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(PrefValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PrefValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), PrefValue::Int(value));
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), PrefValue::Bool(value));
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// JSON-file backed preference store.
///
/// The whole store is one flat JSON object. A missing or unparseable file
/// yields an empty store rather than an error, so first runs and corrupt
/// files both fall back to defaults.
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
    values: BTreeMap<String, PrefValue>,
}

impl FilePrefs {
    /// Default path for the preference file (`<config dir>/autosave/prefs.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("autosave").join("prefs.json"))
    }

    /// Load the store from the given path.
    pub fn load(path: PathBuf) -> Self {
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PrefStore for FilePrefs {
    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(PrefValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(PrefValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), PrefValue::Int(value));
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), PrefValue::Bool(value));
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AutosaveError::Prefs(format!(
                    "cannot create prefs directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| AutosaveError::Prefs(format!("cannot serialize prefs: {e}")))?;

        std::fs::write(&self.path, json).map_err(|e| {
            AutosaveError::Prefs(format!("cannot write prefs to {}: {e}", self.path.display()))
        })?;

        Ok(())
    }
}
