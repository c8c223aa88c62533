//! Startup configuration and persisted settings.
//!
//! [`AppConfig`] carries what the command line decided; [`Settings`] is what
//! survives restarts through eframe's storage. Both are handed to the app
//! explicitly rather than read from process-wide state.

use serde::{Deserialize, Serialize};

/// Storage key under which [`Settings`] are persisted.
pub const SETTINGS_KEY: &str = "settings";

/// Configuration decided at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Show the debug overlay and log at debug level
    pub debug: bool,
}

/// Settings persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode was enabled on the last run
    pub debug: bool,
}

impl Settings {
    /// Decodes settings from their JSON form, falling back to defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Ignoring unreadable settings: {err}");
                Self::default()
            }
        }
    }

    /// Encodes settings as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Loads settings from eframe storage, if any were saved.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|s| s.get_string(SETTINGS_KEY))
            .map(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    /// Writes settings into eframe storage.
    pub fn store(&self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(SETTINGS_KEY, json),
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }

    /// Applies the startup configuration; the command line always wins.
    pub fn apply(&mut self, config: &AppConfig) {
        self.debug = config.debug;
    }
}
