//! Application setup and initialization.
//!
//! Resolves settings, starts logging and opens the dictionary store before
//! any command runs.

use crate::dictionary::Dictionary;
use crate::util::Settings;
use std::path::PathBuf;

/// Initialize the global logger.
///
/// `RUST_LOG` wins when set, otherwise `default_level` is used. Returns false
/// if a logger was already installed.
pub fn init_logging(default_level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

/// Load settings, letting a command-line data directory take precedence
pub fn resolve_settings(data_dir: Option<PathBuf>) -> anyhow::Result<Settings> {
    Ok(Settings::resolve(data_dir, |key| std::env::var(key).ok())?)
}

/// Open the dictionary in the configured data directory
pub fn setup_dictionary(settings: &Settings) -> anyhow::Result<Dictionary> {
    match Dictionary::from_settings(settings) {
        Ok(dictionary) => {
            crate::info!("Dictionary opened in {:?}", settings.data_dir);
            Ok(dictionary)
        }
        Err(e) => {
            crate::error!("Failed to open dictionary in {:?}: {}", settings.data_dir, e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
#[path = "setup_test.rs"]
mod tests;
