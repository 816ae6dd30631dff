//! Storage backend trait for dictionary entries.
//!
//! The trait mirrors the aggregate boundary: an entry is always saved,
//! loaded and deleted together with its senses and word forms. The primary
//! implementation is TursoClient; `MemoryEntryStore` keeps entries in memory.

use crate::dictionary::DictionaryError;
use crate::model::DictionaryEntry;
use async_trait::async_trait;
use uuid::Uuid;

/// Backend trait for entry storage operations.
///
/// Every mutating call is atomic: on error the store is left unchanged.
#[async_trait]
pub trait EntryStoreBackend: Send + Sync {
    /// Insert the aggregate, or replace the senses and forms of an entry
    /// already stored under the same identifier.
    async fn save_entry(&self, entry: &DictionaryEntry) -> Result<(), DictionaryError>;

    /// Save several aggregates in order as a single unit.
    async fn save_entries(&self, entries: &[DictionaryEntry]) -> Result<(), DictionaryError>;

    /// Get an entry by identifier.
    async fn get_entry(&self, id: Uuid) -> Result<Option<DictionaryEntry>, DictionaryError>;

    /// Get the entry whose root form text matches exactly.
    async fn find_by_root(&self, root: &str) -> Result<Option<DictionaryEntry>, DictionaryError>;

    /// List all entries in the order they were first saved.
    async fn list_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError>;

    /// Delete an entry and everything it owns. Returns false if absent.
    async fn delete_entry(&self, id: Uuid) -> Result<bool, DictionaryError>;
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
