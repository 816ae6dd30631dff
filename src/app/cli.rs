// Command-line surface - parses arguments and routes them through the command invoker

use crate::commands::{AddCommand, CommandInvoker, RemoveCommand};
use crate::dictionary::Dictionary;
use crate::model::DictionaryEntry;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "lexicon", version, about = "Manage a dictionary of words and their senses")]
pub struct Args {
    /// Directory holding lexicon.db and settings.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Add a new entry with one sense
    Add {
        word: String,
        definition: String,
        part_of_speech: String,
    },
    /// Append a sense to an existing entry
    AddSense {
        word: String,
        definition: String,
        part_of_speech: String,
    },
    /// Add a part to an entry by query type tag
    AddTo {
        word: String,
        /// Query type tag, e.g. DEFINITION or WORD_FORM
        #[arg(short = 't', long = "type")]
        query_type: String,
        /// Sense index (defaults to 0)
        #[arg(short, long)]
        index: Option<usize>,
        /// Values for the query type
        values: Vec<String>,
    },
    /// Remove an entry, or part of one when --type is given
    Remove {
        query: String,
        #[arg(short = 't', long = "type")]
        query_type: Option<String>,
        /// Sense index (requires --type)
        #[arg(short, long, requires = "query_type")]
        index: Option<usize>,
        /// Word form to remove (WORD_FORM only)
        #[arg(short, long, requires = "query_type")]
        form: Option<String>,
    },
    /// Bulk-load entries from a comma-delimited file
    Import { file: PathBuf },
    /// Show one entry
    Lookup {
        word: String,
        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all entries in load order
    List,
}

/// Run one parsed command, returning the lines to print
pub fn execute(command: Command, dictionary: &Dictionary) -> anyhow::Result<Vec<String>> {
    let mut invoker = CommandInvoker::new(dictionary);

    let lines = match command {
        Command::Add {
            word,
            definition,
            part_of_speech,
        } => vec![invoker.add_to_queue(AddCommand::new(&word, &definition, &part_of_speech))?],
        Command::AddSense {
            word,
            definition,
            part_of_speech,
        } => {
            let cmd = AddCommand::from_tag(&word, "WORD_SENSE", None, &[definition, part_of_speech])?;
            vec![invoker.add_to_queue(cmd)?]
        }
        Command::AddTo {
            word,
            query_type,
            index,
            values,
        } => vec![invoker.add_to_queue(AddCommand::from_tag(&word, &query_type, index, &values)?)?],
        Command::Remove {
            query,
            query_type,
            index,
            form,
        } => {
            let cmd = match query_type {
                Some(tag) => {
                    let payload: Vec<String> = form.into_iter().collect();
                    RemoveCommand::from_tag(&query, &tag, index, &payload)?
                }
                None => RemoveCommand::entry(&query),
            };
            vec![invoker.add_to_queue(cmd)?]
        }
        Command::Import { file } => {
            let entries = dictionary.add_from_file(&file)?;
            vec![format!("Imported {} entries from {}", entries.len(), file.display())]
        }
        Command::Lookup { word, json } => match dictionary.lookup_by_entry(&word)? {
            Some(entry) if json => {
                vec![serde_json::to_string_pretty(&entry).context("Failed to serialize entry")?]
            }
            Some(entry) => format_entry(&entry),
            None => vec![format!("{}: not found", word)],
        },
        Command::List => dictionary
            .get_all_entries()?
            .iter()
            .flat_map(format_entry)
            .collect(),
    };

    Ok(lines)
}

/// Human-readable lines for an entry: the root, then one line per sense
pub fn format_entry(entry: &DictionaryEntry) -> Vec<String> {
    let mut lines = vec![entry.root().to_string()];
    for (idx, sense) in entry.senses().iter().enumerate() {
        let pos = sense.part_of_speech().map(|p| p.label()).unwrap_or("-");
        let definition = sense.definition().map(|d| d.text()).unwrap_or("-");
        let forms: Vec<&str> = sense.word_forms().iter().map(|wf| wf.text()).collect();
        lines.push(format!("  {}. [{}] {} ({})", idx, pos, definition, forms.join(", ")));
    }
    lines
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
