//! Runtime settings.
//!
//! Resolution order: a `.env` file (via `dotenvy`) seeds the process
//! environment, then the optional YAML settings file is read, then
//! environment variables override it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::store::{PREFERENCES_FILE, TABLES_FILE};

/// Data directory override.
pub const HOME_VAR: &str = "DAILYSTUFF_HOME";
/// Settings file override.
pub const CONFIG_VAR: &str = "DAILYSTUFF_CONFIG";
/// Remote folder that receives backups.
pub const DRIVE_FOLDER_VAR: &str = "DAILYSTUFF_DRIVE_FOLDER";
/// Bearer token for the backup upload.
pub const DRIVE_TOKEN_VAR: &str = "DAILYSTUFF_DRIVE_TOKEN";
/// Tracing filter directive.
pub const LOG_VAR: &str = "DAILYSTUFF_LOG";

/// Data directory used when none is configured.
pub const DEFAULT_HOME: &str = ".dailystuff";
/// Settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Fields accepted in the settings file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    drive_folder: Option<String>,
    drive_token: Option<String>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding the tables and preferences.
    pub home: PathBuf,
    /// Remote folder id for backups; backups are disabled without one.
    pub drive_folder: Option<String>,
    /// Bearer token for the upload.
    pub drive_token: Option<String>,
}

impl Settings {
    /// Loads `.env`, the settings file, and environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let home = lookup(HOME_VAR).map_or_else(|| PathBuf::from(DEFAULT_HOME), PathBuf::from);
        let config_path = lookup(CONFIG_VAR).map_or_else(|| home.join(SETTINGS_FILE), PathBuf::from);
        let file = read_settings_file(&config_path)?;

        Ok(Self {
            home,
            drive_folder: lookup(DRIVE_FOLDER_VAR).or(file.drive_folder),
            drive_token: lookup(DRIVE_TOKEN_VAR).or(file.drive_token),
        })
    }

    /// Path of the tables document.
    #[must_use]
    pub fn tables_path(&self) -> PathBuf {
        self.home.join(TABLES_FILE)
    }

    /// Path of the preferences document.
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.home.join(PREFERENCES_FILE)
    }
}

fn read_settings_file(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(FileSettings::default()),
        Err(source) => return Err(ConfigError::Read { path: path.display().to_string(), source }),
    };
    if raw.trim().is_empty() {
        return Ok(FileSettings::default());
    }
    serde_yaml::from_str(&raw)
        .map_err(|source| ConfigError::Parse { path: path.display().to_string(), source })
}
