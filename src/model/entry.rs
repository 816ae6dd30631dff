// Dictionary entry aggregate - an entry owns its root form and its senses,
// each sense owns its definition, part of speech and word forms

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Definition, PartOfSpeech, WordForm};

/// One meaning of an entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordSense {
    /// Definition text, empty once removed from the sense
    #[serde(default)]
    definition: Option<Definition>,
    /// Part of speech, empty once removed from the sense
    #[serde(default)]
    part_of_speech: Option<PartOfSpeech>,
    /// Surface forms realizing this sense, in insertion order
    #[serde(default)]
    word_forms: Vec<WordForm>,
}

impl WordSense {
    pub fn new(definition: Definition, part_of_speech: PartOfSpeech) -> Self {
        Self {
            definition: Some(definition),
            part_of_speech: Some(part_of_speech),
            word_forms: Vec::new(),
        }
    }

    /// Rebuild a sense from stored columns
    pub(crate) fn from_parts(
        definition: Option<Definition>,
        part_of_speech: Option<PartOfSpeech>,
        word_forms: Vec<WordForm>,
    ) -> Self {
        Self {
            definition,
            part_of_speech,
            word_forms,
        }
    }

    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    pub fn part_of_speech(&self) -> Option<&PartOfSpeech> {
        self.part_of_speech.as_ref()
    }

    pub fn word_forms(&self) -> &[WordForm] {
        &self.word_forms
    }

    /// Add a word form unless it collides with one already present.
    ///
    /// Returns false when the form was rejected as a duplicate.
    pub fn add_word_form(&mut self, word_form: WordForm) -> bool {
        if self.word_forms.iter().any(|wf| wf.collides(&word_form)) {
            return false;
        }
        self.word_forms.push(word_form);
        true
    }

    /// Remove the word form with exactly this text
    pub fn remove_word_form(&mut self, text: &str) -> Option<WordForm> {
        let pos = self.word_forms.iter().position(|wf| wf.text() == text)?;
        Some(self.word_forms.remove(pos))
    }

    /// Replace the definition, returning the previous one
    pub fn set_definition(&mut self, definition: Definition) -> Option<Definition> {
        self.definition.replace(definition)
    }

    pub fn take_definition(&mut self) -> Option<Definition> {
        self.definition.take()
    }

    /// Replace the part of speech, returning the previous one
    pub fn set_part_of_speech(&mut self, part_of_speech: PartOfSpeech) -> Option<PartOfSpeech> {
        self.part_of_speech.replace(part_of_speech)
    }

    pub fn take_part_of_speech(&mut self) -> Option<PartOfSpeech> {
        self.part_of_speech.take()
    }
}

/// A lexeme: one immutable root form and its senses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    /// Generated surrogate identifier
    id: Uuid,
    /// Canonical root form, fixed at creation
    root: WordForm,
    /// Senses in insertion order
    #[serde(default)]
    senses: Vec<WordSense>,
}

impl DictionaryEntry {
    /// Create a transient entry with a freshly generated UUID v4
    pub fn new(root: WordForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            root,
            senses: Vec::new(),
        }
    }

    /// Rebuild an entry loaded from storage
    pub(crate) fn from_parts(id: Uuid, root: WordForm, senses: Vec<WordSense>) -> Self {
        Self { id, root, senses }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn root(&self) -> &WordForm {
        &self.root
    }

    pub fn senses(&self) -> &[WordSense] {
        &self.senses
    }

    pub fn sense(&self, index: usize) -> Option<&WordSense> {
        self.senses.get(index)
    }

    pub fn sense_mut(&mut self, index: usize) -> Option<&mut WordSense> {
        self.senses.get_mut(index)
    }

    pub fn add_sense(&mut self, sense: WordSense) {
        self.senses.push(sense);
    }

    pub fn remove_sense(&mut self, index: usize) -> Option<WordSense> {
        if index < self.senses.len() {
            Some(self.senses.remove(index))
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "entry_test.rs"]
mod tests;
