// Dictionary commands - add/remove requests executed against a Dictionary handle

pub mod add;
pub mod invoker;
pub mod remove;

pub use add::{AddCommand, AddTarget};
pub use invoker::{CommandInvoker, CommandRecord};
pub use remove::{RemoveCommand, RemoveTarget};

use crate::dictionary::{Dictionary, DictionaryError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kind a command targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    DictionaryEntry,
    WordSense,
    Definition,
    PartOfSpeech,
    WordForm,
}

impl QueryType {
    pub const ALL: [QueryType; 5] = [
        QueryType::DictionaryEntry,
        QueryType::WordSense,
        QueryType::Definition,
        QueryType::PartOfSpeech,
        QueryType::WordForm,
    ];

    /// Tag used on the command line and in serialized commands
    pub fn tag(&self) -> &'static str {
        match self {
            QueryType::DictionaryEntry => "DICTIONARY_ENTRY",
            QueryType::WordSense => "WORD_SENSE",
            QueryType::Definition => "DEFINITION",
            QueryType::PartOfSpeech => "PART_OF_SPEECH",
            QueryType::WordForm => "WORD_FORM",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for QueryType {
    type Err = String;

    /// Parse a tag, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryType::ALL
            .into_iter()
            .find(|qt| qt.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown query type: {}", s))
    }
}

/// A single mutation request against the dictionary
pub trait DictionaryCommand {
    /// Root form of the targeted entry
    fn query(&self) -> &str;

    /// Targeted entity kind; None when built from an unrecognized tag
    fn query_type(&self) -> Option<QueryType>;

    /// Execute the command, setting its status on success
    fn run(&mut self, dictionary: &Dictionary) -> Result<(), DictionaryError>;

    /// Status message, available once the command has run
    fn status(&self) -> Option<&str>;
}

/// "<query>" prefix for statuses about a whole entry
pub(crate) fn identifier(query: &str) -> String {
    query.to_string()
}

/// "<query>#<index>" prefix for statuses about one sense
pub(crate) fn sense_identifier(query: &str, index: usize) -> String {
    format!("{}#{}", query, index)
}

/// Status for a command whose tag names no known query type
pub(crate) fn not_supported_status(tag: &str) -> String {
    format!("{}: query type not supported", tag)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
