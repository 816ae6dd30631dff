// Value types held by a word sense: surface forms, definitions and parts of speech

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single surface token realizing a sense (e.g. "run", "ran")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct WordForm {
    text: String,
}

impl WordForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The token text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether two forms share the exact same text.
    ///
    /// Used to reject duplicate surface forms before they are added to a sense.
    pub fn collides(&self, other: &WordForm) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for WordForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for WordForm {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Prose describing one sense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Definition {
    text: String,
}

impl Definition {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Definition {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Grammatical category label, e.g. "Noun" or "Verb"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PartOfSpeech {
    label: String,
}

impl PartOfSpeech {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<&str> for PartOfSpeech {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[cfg(test)]
#[path = "word_form_test.rs"]
mod tests;
