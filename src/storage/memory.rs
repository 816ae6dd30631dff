// In-memory entry store - keeps aggregates in insertion order without persistence

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;

use super::EntryStoreBackend;
use crate::dictionary::DictionaryError;
use crate::model::DictionaryEntry;

/// Entry store holding aggregates in a vector, in first-save order
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: Mutex<Vec<DictionaryEntry>>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<DictionaryEntry>>, DictionaryError> {
        self.entries
            .lock()
            .map_err(|e| DictionaryError::PersistenceError(format!("Lock error: {}", e)))
    }
}

/// Apply one save to `entries`, enforcing root form uniqueness
fn upsert(entries: &mut Vec<DictionaryEntry>, entry: &DictionaryEntry) -> Result<(), DictionaryError> {
    let conflict = entries
        .iter()
        .any(|e| e.id() != entry.id() && e.root().collides(entry.root()));
    if conflict {
        return Err(DictionaryError::PersistenceError(format!(
            "Root form '{}' already exists",
            entry.root().text()
        )));
    }

    match entries.iter_mut().find(|e| e.id() == entry.id()) {
        Some(existing) => *existing = entry.clone(),
        None => entries.push(entry.clone()),
    }
    Ok(())
}

#[async_trait]
impl EntryStoreBackend for MemoryEntryStore {
    async fn save_entry(&self, entry: &DictionaryEntry) -> Result<(), DictionaryError> {
        let mut entries = self.lock()?;
        upsert(&mut entries, entry)
    }

    async fn save_entries(&self, batch: &[DictionaryEntry]) -> Result<(), DictionaryError> {
        let mut entries = self.lock()?;
        // Stage on a copy so a failing entry leaves the store untouched
        let mut staged = entries.clone();
        for entry in batch {
            upsert(&mut staged, entry)?;
        }
        *entries = staged;
        Ok(())
    }

    async fn get_entry(&self, id: Uuid) -> Result<Option<DictionaryEntry>, DictionaryError> {
        Ok(self.lock()?.iter().find(|e| e.id() == id).cloned())
    }

    async fn find_by_root(&self, root: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        Ok(self.lock()?.iter().find(|e| e.root().text() == root).cloned())
    }

    async fn list_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        Ok(self.lock()?.clone())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<bool, DictionaryError> {
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|e| e.id() != id);
        Ok(entries.len() < before)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
