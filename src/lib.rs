// Lexicon: a dictionary of entries, senses and word forms over an embedded SQLite store

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod commands;
pub mod dictionary;
pub mod model;
pub mod storage;
pub mod turso;
pub mod util;

use clap::Parser;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use commands::{AddCommand, CommandInvoker, DictionaryCommand, QueryType, RemoveCommand};
pub use dictionary::{Dictionary, DictionaryError};
pub use model::{Definition, DictionaryEntry, PartOfSpeech, WordForm, WordSense};

/// Binary entry point: parse arguments, open the dictionary, run one command.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn run() -> anyhow::Result<()> {
    let args = app::cli::Args::parse();
    let settings = app::setup::resolve_settings(args.data_dir)?;
    app::setup::init_logging(&settings.log_level);
    debug!("Settings resolved: {:?}", settings);

    let dictionary = app::setup::setup_dictionary(&settings)?;
    for line in app::cli::execute(args.command, &dictionary)? {
        println!("{}", line);
    }
    Ok(())
}
