// Error taxonomy for dictionary operations

/// Error types for dictionary operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DictionaryError {
    /// No entry has this root form
    #[error("No entry found for '{0}'")]
    EntryNotFound(String),
    /// The targeted sense holds no word form with this text
    #[error("Word form '{form}' not found in sense {index} of '{query}'")]
    WordFormNotFound {
        query: String,
        index: usize,
        form: String,
    },
    /// Import file does not exist
    #[error("Import file {0} not found")]
    ImportFileNotFound(String),
    /// Sense index outside the entry's sense collection
    #[error("Sense index {index} out of range for '{query}' ({len} senses)")]
    SenseIndexOutOfRange {
        query: String,
        index: usize,
        len: usize,
    },
    /// Malformed import line
    #[error("Malformed line {line}: {message}")]
    Format { line: usize, message: String },
    /// Word form collides with one already present in the sense
    #[error("Word form '{form}' already exists in sense {index} of '{query}'")]
    DuplicateWordForm {
        query: String,
        index: usize,
        form: String,
    },
    /// Command is missing a payload value its query type needs
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    /// Failed to persist entries
    #[error("Failed to persist entries: {0}")]
    PersistenceError(String),
    /// Failed to load entries
    #[error("Failed to load entries: {0}")]
    LoadError(String),
}

impl DictionaryError {
    /// Whether the error reports a missing entry, word form or import file
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DictionaryError::EntryNotFound(_)
                | DictionaryError::WordFormNotFound { .. }
                | DictionaryError::ImportFileNotFound(_)
        )
    }
}
