// Remove command - deletes an entry or one of its nested parts

use super::{identifier, not_supported_status, sense_identifier, DictionaryCommand, QueryType};
use crate::dictionary::{Dictionary, DictionaryError};

/// What a remove command deletes
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveTarget {
    Entry,
    Sense { index: usize },
    Definition { index: usize },
    PartOfSpeech { index: usize },
    WordForm { index: usize, form: String },
    /// Built from a tag that names no query type
    Unsupported(String),
}

impl RemoveTarget {
    fn query_type(&self) -> Option<QueryType> {
        match self {
            RemoveTarget::Entry => Some(QueryType::DictionaryEntry),
            RemoveTarget::Sense { .. } => Some(QueryType::WordSense),
            RemoveTarget::Definition { .. } => Some(QueryType::Definition),
            RemoveTarget::PartOfSpeech { .. } => Some(QueryType::PartOfSpeech),
            RemoveTarget::WordForm { .. } => Some(QueryType::WordForm),
            RemoveTarget::Unsupported(_) => None,
        }
    }
}

/// Command removing data from the entry rooted at `query`
#[derive(Debug, Clone)]
pub struct RemoveCommand {
    query: String,
    target: RemoveTarget,
    status: Option<String>,
}

impl RemoveCommand {
    pub fn new(query: &str, target: RemoveTarget) -> Self {
        Self {
            query: query.to_string(),
            target,
            status: None,
        }
    }

    /// Remove the whole entry `query`
    pub fn entry(query: &str) -> Self {
        Self::new(query, RemoveTarget::Entry)
    }

    /// Build from a query type tag. Word form removal takes the form text
    /// as its only payload value; a missing index means sense 0.
    pub fn from_tag(
        query: &str,
        tag: &str,
        index: Option<usize>,
        payload: &[String],
    ) -> Result<Self, DictionaryError> {
        let Ok(query_type) = tag.parse::<QueryType>() else {
            return Ok(Self::new(query, RemoveTarget::Unsupported(tag.to_string())));
        };
        let index = index.unwrap_or(0);
        let target = match query_type {
            QueryType::DictionaryEntry => RemoveTarget::Entry,
            QueryType::WordSense => RemoveTarget::Sense { index },
            QueryType::Definition => RemoveTarget::Definition { index },
            QueryType::PartOfSpeech => RemoveTarget::PartOfSpeech { index },
            QueryType::WordForm => {
                let form = payload.first().cloned().ok_or_else(|| {
                    DictionaryError::InvalidCommand(format!("{} remove for '{}' needs a word form", query_type, query))
                })?;
                RemoveTarget::WordForm { index, form }
            }
        };
        Ok(Self::new(query, target))
    }

    pub fn target(&self) -> &RemoveTarget {
        &self.target
    }
}

impl DictionaryCommand for RemoveCommand {
    fn query(&self) -> &str {
        &self.query
    }

    fn query_type(&self) -> Option<QueryType> {
        self.target.query_type()
    }

    fn run(&mut self, dictionary: &Dictionary) -> Result<(), DictionaryError> {
        let query = self.query.as_str();
        let status = match &self.target {
            RemoveTarget::Entry => {
                dictionary.remove_dictionary_entry(query)?;
                format!("{}: removed", identifier(query))
            }
            RemoveTarget::Sense { index } => {
                dictionary.remove_word_sense(query, *index)?;
                format!("{}: Word Sense {} removed", identifier(query), index)
            }
            RemoveTarget::Definition { index } => {
                dictionary.remove_definition(query, *index)?;
                format!("{}: Definition removed", sense_identifier(query, *index))
            }
            RemoveTarget::PartOfSpeech { index } => {
                dictionary.remove_part_of_speech(query, *index)?;
                format!("{}: Part of Speech removed", sense_identifier(query, *index))
            }
            RemoveTarget::WordForm { index, form } => {
                dictionary.remove_word_form(query, *index, form)?;
                format!("{}: Word Form {} removed", sense_identifier(query, *index), form)
            }
            RemoveTarget::Unsupported(tag) => not_supported_status(tag),
        };
        self.status = Some(status);
        Ok(())
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

#[cfg(test)]
#[path = "remove_test.rs"]
mod tests;
