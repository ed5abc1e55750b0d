//! Persisted dashboard settings.
//!
//! A single small JSON document in the data directory. The only field
//! today is the active search root, written whenever the user changes it
//! so the choice survives restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

/// Settings file name inside the data directory.
const SETTINGS_FILE: &str = "settings.json";

/// User settings persisted between sessions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    /// Root directory the user last pointed the search at, if any.
    pub active_root_dir: Option<String>,
}

/// Path of the settings file under `data_dir`.
#[must_use]
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

/// Load settings from `data_dir`.
///
/// Missing, unreadable, or malformed files yield defaults; a malformed
/// file additionally logs a warning. An empty `active_root_dir` string is
/// normalized to `None`.
#[must_use]
pub fn load_settings(data_dir: &Path) -> PersistedSettings {
    let path = settings_path(data_dir);
    let Ok(raw) = std::fs::read_to_string(&path) else {
        return PersistedSettings::default();
    };
    match serde_json::from_str::<PersistedSettings>(&raw) {
        Ok(mut settings) => {
            if settings
                .active_root_dir
                .as_deref()
                .is_some_and(|s| s.trim().is_empty())
            {
                settings.active_root_dir = None;
            }
            settings
        }
        Err(e) => {
            tracing::warn!(error = %e, ?path, "malformed settings file, using defaults");
            PersistedSettings::default()
        }
    }
}

/// Save settings into `data_dir`, creating the directory if needed.
pub fn save_settings(data_dir: &Path, settings: &PersistedSettings) -> Result<(), SettingsError> {
    std::fs::create_dir_all(data_dir).map_err(|source| SettingsError::CreateDir {
        path: data_dir.to_path_buf(),
        source,
    })?;
    let path = settings_path(data_dir);
    let body = serde_json::to_string_pretty(settings).unwrap_or_else(|_| "{}".to_string());
    std::fs::write(&path, body).map_err(|source| SettingsError::Write { path, source })
}
