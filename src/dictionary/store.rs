// Dictionary handle - CRUD operations over an entry store
//
// The handle owns its storage backend and the runtime that drives it, so
// callers use a plain synchronous API. Each mutation loads the aggregate,
// changes it in memory and saves it back in one store transaction.

use std::fs;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::runtime::Runtime;
use uuid::Uuid;

use super::import::parse_entries;
use super::DictionaryError;
use crate::model::{Definition, DictionaryEntry, PartOfSpeech, WordForm, WordSense};
use crate::storage::{EntryStoreBackend, MemoryEntryStore};
use crate::turso::{initialize_schema, TursoClient, TursoError};
use crate::util::{build_runtime, run_async, Settings};

/// Handle to a dictionary store
pub struct Dictionary {
    backend: Box<dyn EntryStoreBackend>,
    /// Taken on drop so it can shut down without blocking
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary").finish_non_exhaustive()
    }
}

impl Drop for Dictionary {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Dictionary {
    /// Open (or create) the SQLite-backed dictionary in `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, DictionaryError> {
        let runtime = start_runtime()?;
        let data_dir = data_dir.into();

        let client = run_async(&runtime, async move {
            let client = TursoClient::new(data_dir).await?;
            initialize_schema(&client).await?;
            Ok::<_, TursoError>(client)
        })
        .map_err(|e| DictionaryError::PersistenceError(e.to_string()))?;

        crate::info!("Dictionary database ready at {:?}", client.db_path());
        Ok(Self {
            backend: Box::new(client),
            runtime: Some(runtime),
        })
    }

    /// Open the dictionary in the configured data directory
    pub fn from_settings(settings: &Settings) -> Result<Self, DictionaryError> {
        Self::open(settings.data_dir.clone())
    }

    /// Wrap an arbitrary storage backend
    pub fn with_backend(backend: impl EntryStoreBackend + 'static) -> Result<Self, DictionaryError> {
        Ok(Self {
            backend: Box::new(backend),
            runtime: Some(start_runtime()?),
        })
    }

    /// Dictionary kept in memory only
    pub fn in_memory() -> Result<Self, DictionaryError> {
        Self::with_backend(MemoryEntryStore::new())
    }

    fn block_on<T, F>(&self, future: F) -> Result<T, DictionaryError>
    where
        F: Future<Output = Result<T, DictionaryError>> + Send,
        T: Send,
    {
        let runtime = self.runtime.as_ref().ok_or_else(|| {
            DictionaryError::PersistenceError("Dictionary runtime has been shut down".to_string())
        })?;
        run_async(runtime, future)
    }

    /// Persist a new entry and its full aggregate
    pub fn add_entry(&self, entry: &DictionaryEntry) -> Result<(), DictionaryError> {
        self.block_on(self.backend.save_entry(entry))?;
        crate::info!("Added dictionary entry: {} ({})", entry.root(), entry.id());
        Ok(())
    }

    /// Append a sense to `entry` and persist the aggregate.
    ///
    /// The entry is inserted if it was never persisted. On failure the sense
    /// is taken back out of `entry`.
    pub fn add_sense(&self, sense: WordSense, entry: &mut DictionaryEntry) -> Result<(), DictionaryError> {
        entry.add_sense(sense);
        if let Err(e) = self.block_on(self.backend.save_entry(entry)) {
            entry.remove_sense(entry.senses().len() - 1);
            return Err(e);
        }
        crate::info!("Added sense {} to '{}'", entry.senses().len() - 1, entry.root());
        Ok(())
    }

    /// Bulk-load entries from a comma-delimited file.
    ///
    /// The file is parsed completely before anything is written, then all
    /// entries are saved in one transaction. Returns the loaded entries in
    /// file order.
    pub fn add_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let path = path.as_ref();
        crate::debug!("Importing dictionary entries from {:?}", path);

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DictionaryError::ImportFileNotFound(path.display().to_string()),
            _ => DictionaryError::LoadError(format!("Failed to read {:?}: {}", path, e)),
        })?;
        let content = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            DictionaryError::Format {
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
                message: "invalid UTF-8".to_string(),
            }
        })?;

        let entries = parse_entries(&content)?;
        self.block_on(self.backend.save_entries(&entries))?;

        crate::info!("Imported {} dictionary entries from {:?}", entries.len(), path);
        Ok(entries)
    }

    /// Entry whose root form matches `root` exactly
    pub fn lookup_by_entry(&self, root: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        self.block_on(self.backend.find_by_root(root))
    }

    /// Entry stored under `id`
    pub fn get_entry(&self, id: Uuid) -> Result<Option<DictionaryEntry>, DictionaryError> {
        self.block_on(self.backend.get_entry(id))
    }

    /// All entries in load order
    pub fn get_all_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        self.block_on(self.backend.list_entries())
    }

    /// Remove the entry whose root form is `query`, returning it
    pub fn remove_dictionary_entry(&self, query: &str) -> Result<DictionaryEntry, DictionaryError> {
        let entry = self.require_entry(query)?;
        if !self.block_on(self.backend.delete_entry(entry.id()))? {
            return Err(DictionaryError::EntryNotFound(query.to_string()));
        }
        crate::info!("Removed dictionary entry: {} ({})", entry.root(), entry.id());
        Ok(entry)
    }

    /// Remove sense `index` of the entry `query`
    pub fn remove_word_sense(&self, query: &str, index: usize) -> Result<WordSense, DictionaryError> {
        let mut entry = self.require_entry(query)?;
        let len = entry.senses().len();
        let removed = entry
            .remove_sense(index)
            .ok_or_else(|| out_of_range(query, index, len))?;
        self.block_on(self.backend.save_entry(&entry))?;
        crate::info!("Removed sense {} from '{}'", index, query);
        Ok(removed)
    }

    /// Clear the definition of sense `index`, returning the old one if set
    pub fn remove_definition(&self, query: &str, index: usize) -> Result<Option<Definition>, DictionaryError> {
        self.update_sense(query, index, |sense| Ok(sense.take_definition()))
    }

    /// Clear the part of speech of sense `index`, returning the old one if set
    pub fn remove_part_of_speech(
        &self,
        query: &str,
        index: usize,
    ) -> Result<Option<PartOfSpeech>, DictionaryError> {
        self.update_sense(query, index, |sense| Ok(sense.take_part_of_speech()))
    }

    /// Remove the word form `form` from sense `index`
    pub fn remove_word_form(&self, query: &str, index: usize, form: &str) -> Result<WordForm, DictionaryError> {
        self.update_sense(query, index, |sense| {
            sense
                .remove_word_form(form)
                .ok_or_else(|| DictionaryError::WordFormNotFound {
                    query: query.to_string(),
                    index,
                    form: form.to_string(),
                })
        })
    }

    /// Remove `entry` by identifier
    pub fn remove(&self, entry: &DictionaryEntry) -> Result<(), DictionaryError> {
        if !self.block_on(self.backend.delete_entry(entry.id()))? {
            return Err(DictionaryError::EntryNotFound(entry.root().text().to_string()));
        }
        crate::info!("Removed dictionary entry: {} ({})", entry.root(), entry.id());
        Ok(())
    }

    /// Set the definition of sense `index`, returning the replaced one
    pub fn set_definition(
        &self,
        query: &str,
        index: usize,
        definition: Definition,
    ) -> Result<Option<Definition>, DictionaryError> {
        self.update_sense(query, index, |sense| Ok(sense.set_definition(definition)))
    }

    /// Set the part of speech of sense `index`, returning the replaced one
    pub fn set_part_of_speech(
        &self,
        query: &str,
        index: usize,
        part_of_speech: PartOfSpeech,
    ) -> Result<Option<PartOfSpeech>, DictionaryError> {
        self.update_sense(query, index, |sense| Ok(sense.set_part_of_speech(part_of_speech)))
    }

    /// Add a word form to sense `index`, rejecting one that collides
    pub fn add_word_form(&self, query: &str, index: usize, form: WordForm) -> Result<(), DictionaryError> {
        self.update_sense(query, index, |sense| {
            let text = form.text().to_string();
            if sense.add_word_form(form) {
                Ok(())
            } else {
                Err(DictionaryError::DuplicateWordForm {
                    query: query.to_string(),
                    index,
                    form: text,
                })
            }
        })
    }

    fn require_entry(&self, query: &str) -> Result<DictionaryEntry, DictionaryError> {
        self.lookup_by_entry(query)?
            .ok_or_else(|| DictionaryError::EntryNotFound(query.to_string()))
    }

    /// Load `query`, apply `change` to sense `index` and save the entry.
    /// Nothing is written when `change` fails.
    fn update_sense<T, F>(&self, query: &str, index: usize, change: F) -> Result<T, DictionaryError>
    where
        F: FnOnce(&mut WordSense) -> Result<T, DictionaryError>,
    {
        let mut entry = self.require_entry(query)?;
        let len = entry.senses().len();
        let sense = entry
            .sense_mut(index)
            .ok_or_else(|| out_of_range(query, index, len))?;
        let result = change(sense)?;
        self.block_on(self.backend.save_entry(&entry))?;
        crate::debug!("Updated sense {} of '{}'", index, query);
        Ok(result)
    }
}

fn start_runtime() -> Result<Runtime, DictionaryError> {
    build_runtime()
        .map_err(|e| DictionaryError::PersistenceError(format!("Failed to start runtime: {}", e)))
}

fn out_of_range(query: &str, index: usize, len: usize) -> DictionaryError {
    DictionaryError::SenseIndexOutOfRange {
        query: query.to_string(),
        index,
        len,
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
