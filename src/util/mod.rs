//! Shared utilities for the lexicon crate.
//!
//! - `settings`: settings file and environment overrides
//! - `runtime`: Tokio runtime helpers for async-to-sync bridges

mod runtime;
mod settings;

pub use runtime::{build_runtime, run_async};
pub use settings::{default_data_dir, Settings, SettingsError};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
