//! Autosave settings: scalar configuration loaded from and persisted to
//! a [`PrefStore`].
//!
//! All fields have documented defaults so a fresh or corrupt store yields
//! a working configuration. Validation happens before persisting; the
//! store never holds an out-of-range interval.

use crate::error::{AutosaveError, Result};
use crate::prefs::PrefStore;
use serde::{Deserialize, Serialize};

/// Minimum allowed save interval in seconds.
pub const INTERVAL_MIN_SECS: u64 = 30;
/// Maximum allowed save interval in seconds.
pub const INTERVAL_MAX_SECS: u64 = 600;
/// Default save interval in seconds.
pub const INTERVAL_DEFAULT_SECS: u64 = 300;

const PREF_INTERVAL: &str = "autosave.interval_secs";
const PREF_ENABLED: &str = "autosave.enabled";
const PREF_SAVE_MODE: &str = "autosave.save_mode";
const PREF_NOTIFICATIONS: &str = "autosave.show_notifications";
const PREF_DEBUG_LOGS: &str = "autosave.show_debug_logs";

/// What a save fire covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Save only open scene documents (default).
    #[default]
    Scene,
    /// Save only pending asset changes.
    Assets,
    /// Save scenes first, then assets.
    All,
}

impl SaveMode {
    /// Stable integer index used by the preference store.
    pub fn as_index(self) -> i64 {
        match self {
            Self::Scene => 0,
            Self::Assets => 1,
            Self::All => 2,
        }
    }

    /// Decode a stored index; unknown values fall back to [`SaveMode::Scene`].
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Self::Assets,
            2 => Self::All,
            _ => Self::Scene,
        }
    }
}

impl std::fmt::Display for SaveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scene => write!(f, "scene"),
            Self::Assets => write!(f, "assets"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Autosave configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds between save fires, within `[30, 600]`.
    pub interval_secs: u64,
    /// Whether the scheduler fires at all.
    pub enabled: bool,
    /// What each fire saves.
    pub save_mode: SaveMode,
    /// Surface a notification after each save.
    pub show_notifications: bool,
    /// Emit debug log lines for save begin/finish and suspension.
    pub show_debug_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_secs: INTERVAL_DEFAULT_SECS,
            enabled: true,
            save_mode: SaveMode::Scene,
            show_notifications: true,
            show_debug_logs: false,
        }
    }
}

impl Settings {
    /// Validate all fields.
    ///
    /// # Errors
    ///
    /// Returns [`AutosaveError::Config`] when `interval_secs` is outside
    /// `[30, 600]`. Callers must clamp or reject before persisting.
    pub fn validate(&self) -> Result<()> {
        if self.interval_secs < INTERVAL_MIN_SECS || self.interval_secs > INTERVAL_MAX_SECS {
            return Err(AutosaveError::Config(format!(
                "save interval {}s is outside [{INTERVAL_MIN_SECS}, {INTERVAL_MAX_SECS}]",
                self.interval_secs
            )));
        }
        Ok(())
    }

    /// Load settings from the store, falling back to defaults per field.
    pub fn load(store: &dyn PrefStore) -> Self {
        let defaults = Self::default();
        Self {
            interval_secs: store
                .get_int(PREF_INTERVAL)
                .and_then(|v| u64::try_from(v).ok())
                .unwrap_or(defaults.interval_secs),
            enabled: store.get_bool(PREF_ENABLED).unwrap_or(defaults.enabled),
            save_mode: store
                .get_int(PREF_SAVE_MODE)
                .map(SaveMode::from_index)
                .unwrap_or(defaults.save_mode),
            show_notifications: store
                .get_bool(PREF_NOTIFICATIONS)
                .unwrap_or(defaults.show_notifications),
            show_debug_logs: store
                .get_bool(PREF_DEBUG_LOGS)
                .unwrap_or(defaults.show_debug_logs),
        }
    }

    /// Validate and persist all fields to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the store cannot be flushed.
    pub fn save(&self, store: &mut dyn PrefStore) -> Result<()> {
        self.validate()?;

        store.set_int(PREF_INTERVAL, self.interval_secs as i64);
        store.set_bool(PREF_ENABLED, self.enabled);
        store.set_int(PREF_SAVE_MODE, self.save_mode.as_index());
        store.set_bool(PREF_NOTIFICATIONS, self.show_notifications);
        store.set_bool(PREF_DEBUG_LOGS, self.show_debug_logs);
        store.flush()
    }
}
