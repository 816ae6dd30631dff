// Add command - creates entries or attaches new parts to an existing one

use super::{identifier, not_supported_status, sense_identifier, DictionaryCommand, QueryType};
use crate::dictionary::{Dictionary, DictionaryError};
use crate::model::{Definition, DictionaryEntry, PartOfSpeech, WordForm, WordSense};

/// What an add command creates
#[derive(Debug, Clone, PartialEq)]
pub enum AddTarget {
    /// New entry with one sense carrying the root form
    Entry {
        definition: String,
        part_of_speech: String,
    },
    /// Extra sense appended to an existing entry
    Sense {
        definition: String,
        part_of_speech: String,
    },
    Definition { index: usize, text: String },
    PartOfSpeech { index: usize, label: String },
    WordForm { index: usize, form: String },
    /// Built from a tag that names no query type
    Unsupported(String),
}

impl AddTarget {
    fn query_type(&self) -> Option<QueryType> {
        match self {
            AddTarget::Entry { .. } => Some(QueryType::DictionaryEntry),
            AddTarget::Sense { .. } => Some(QueryType::WordSense),
            AddTarget::Definition { .. } => Some(QueryType::Definition),
            AddTarget::PartOfSpeech { .. } => Some(QueryType::PartOfSpeech),
            AddTarget::WordForm { .. } => Some(QueryType::WordForm),
            AddTarget::Unsupported(_) => None,
        }
    }
}

/// Command adding data for the entry rooted at `query`
#[derive(Debug, Clone)]
pub struct AddCommand {
    query: String,
    target: AddTarget,
    status: Option<String>,
}

impl AddCommand {
    /// Add a new entry `word` with a single sense
    pub fn new(word: &str, definition: &str, part_of_speech: &str) -> Self {
        Self::with_target(
            word,
            AddTarget::Entry {
                definition: definition.to_string(),
                part_of_speech: part_of_speech.to_string(),
            },
        )
    }

    pub fn with_target(query: &str, target: AddTarget) -> Self {
        Self {
            query: query.to_string(),
            target,
            status: None,
        }
    }

    /// Build from a query type tag and positional payload.
    ///
    /// Entry and sense adds take `[definition, part_of_speech]`, the others
    /// take a single value. A missing index means sense 0. An unknown tag
    /// yields an unsupported command rather than an error.
    pub fn from_tag(
        query: &str,
        tag: &str,
        index: Option<usize>,
        payload: &[String],
    ) -> Result<Self, DictionaryError> {
        let Ok(query_type) = tag.parse::<QueryType>() else {
            return Ok(Self::with_target(query, AddTarget::Unsupported(tag.to_string())));
        };
        let index = index.unwrap_or(0);
        let arg = |i: usize, name: &str| {
            payload.get(i).cloned().ok_or_else(|| {
                DictionaryError::InvalidCommand(format!("{} add for '{}' needs a {}", query_type, query, name))
            })
        };

        let target = match query_type {
            QueryType::DictionaryEntry => AddTarget::Entry {
                definition: arg(0, "definition")?,
                part_of_speech: arg(1, "part of speech")?,
            },
            QueryType::WordSense => AddTarget::Sense {
                definition: arg(0, "definition")?,
                part_of_speech: arg(1, "part of speech")?,
            },
            QueryType::Definition => AddTarget::Definition {
                index,
                text: arg(0, "definition")?,
            },
            QueryType::PartOfSpeech => AddTarget::PartOfSpeech {
                index,
                label: arg(0, "part of speech")?,
            },
            QueryType::WordForm => AddTarget::WordForm {
                index,
                form: arg(0, "word form")?,
            },
        };
        Ok(Self::with_target(query, target))
    }

    pub fn target(&self) -> &AddTarget {
        &self.target
    }

    fn root_sense(&self, definition: &str, part_of_speech: &str) -> WordSense {
        let mut sense = WordSense::new(Definition::new(definition), PartOfSpeech::new(part_of_speech));
        sense.add_word_form(WordForm::new(self.query.as_str()));
        sense
    }
}

impl DictionaryCommand for AddCommand {
    fn query(&self) -> &str {
        &self.query
    }

    fn query_type(&self) -> Option<QueryType> {
        self.target.query_type()
    }

    fn run(&mut self, dictionary: &Dictionary) -> Result<(), DictionaryError> {
        let query = self.query.as_str();
        let status = match &self.target {
            AddTarget::Entry {
                definition,
                part_of_speech,
            } => {
                let mut entry = DictionaryEntry::new(WordForm::new(query));
                entry.add_sense(self.root_sense(definition, part_of_speech));
                dictionary.add_entry(&entry)?;
                format!("{}: added", identifier(query))
            }
            AddTarget::Sense {
                definition,
                part_of_speech,
            } => {
                let mut entry = dictionary
                    .lookup_by_entry(query)?
                    .ok_or_else(|| DictionaryError::EntryNotFound(query.to_string()))?;
                dictionary.add_sense(self.root_sense(definition, part_of_speech), &mut entry)?;
                format!("{}: Word Sense added", identifier(query))
            }
            AddTarget::Definition { index, text } => {
                dictionary.set_definition(query, *index, Definition::new(text.as_str()))?;
                format!("{}: Definition added", sense_identifier(query, *index))
            }
            AddTarget::PartOfSpeech { index, label } => {
                dictionary.set_part_of_speech(query, *index, PartOfSpeech::new(label.as_str()))?;
                format!("{}: Part of Speech added", sense_identifier(query, *index))
            }
            AddTarget::WordForm { index, form } => {
                dictionary.add_word_form(query, *index, WordForm::new(form.as_str()))?;
                format!("{}: Word Form {} added", sense_identifier(query, *index), form)
            }
            AddTarget::Unsupported(tag) => not_supported_status(tag),
        };
        self.status = Some(status);
        Ok(())
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
