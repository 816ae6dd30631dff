//! Application settings.
//!
//! Settings come from an optional `settings.json` in the default data
//! directory, then environment variables override individual values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "lexicon";

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "LEXICON_DATA_DIR";

/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "LEXICON_LOG_LEVEL";

fn default_log_level() -> String {
    "info".to_string()
}

/// Errors while reading settings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Read(String),
    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Directory holding the dictionary database
    pub data_dir: PathBuf,
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Platform data directory for the app.
///
/// Falls back to `./lexicon` when the platform directory is unknown.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

impl Settings {
    /// Load settings from the process environment's data directory
    pub fn load() -> Result<Self, SettingsError> {
        Self::resolve(None, |key| std::env::var(key).ok())
    }

    /// Resolve the data directory, then load `settings.json` from it.
    ///
    /// The directory is `data_dir` if given, else `LEXICON_DATA_DIR` from
    /// `lookup`, else the platform default. An explicit directory always wins
    /// over a `dataDir` in the file. Variable overrides apply last.
    pub fn resolve<F>(data_dir: Option<PathBuf>, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = data_dir.or_else(|| {
            lookup(ENV_DATA_DIR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        });
        let dir = explicit.clone().unwrap_or_else(default_data_dir);

        let mut settings = Self::load_from(&dir.join(SETTINGS_FILE))?;
        settings.apply_overrides(lookup);
        if let Some(dir) = explicit {
            settings.data_dir = dir;
        }
        Ok(settings)
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::Read(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Override values from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
