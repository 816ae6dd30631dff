// Entity model - entries, senses and the value types they own

mod entry;
mod word_form;

pub use entry::{DictionaryEntry, WordSense};
pub use word_form::{Definition, PartOfSpeech, WordForm};
