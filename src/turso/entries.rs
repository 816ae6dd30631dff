// Dictionary entry persistence using Turso/libsql
//
// Stores each entry aggregate across dictionary_entry, word_sense and
// word_form. Every write runs inside one transaction and rewrites the
// entry's senses and forms as a unit.

use async_trait::async_trait;
use libsql::{params, Connection};
use uuid::Uuid;

use super::client::{TursoClient, TursoError};
use crate::dictionary::DictionaryError;
use crate::model::{Definition, DictionaryEntry, PartOfSpeech, WordForm, WordSense};
use crate::storage::EntryStoreBackend;

const SELECT_ENTRY_COLUMNS: &str = "SELECT id, root_form FROM dictionary_entry";

impl TursoClient {
    /// Insert or replace an entry aggregate.
    ///
    /// A new entry is appended after the last stored position; an existing
    /// entry keeps its position and has its senses and forms rewritten.
    pub async fn save_dictionary_entry(&self, entry: &DictionaryEntry) -> Result<(), DictionaryError> {
        self.save_dictionary_entries(std::slice::from_ref(entry)).await
    }

    /// Insert or replace several aggregates in one transaction, in order.
    pub async fn save_dictionary_entries(
        &self,
        entries: &[DictionaryEntry],
    ) -> Result<(), DictionaryError> {
        let conn = self.connect().map_err(persistence_error)?;
        let tx = conn.transaction().await.map_err(|e| persistence_error(e.into()))?;

        let created_at = chrono::Utc::now().to_rfc3339();
        for entry in entries {
            if let Err(e) = write_entry(&tx, entry, &created_at).await {
                if let Err(rollback_err) = tx.rollback().await {
                    crate::warn!("Rollback failed after write error: {}", rollback_err);
                }
                return Err(match e {
                    TursoError::Constraint(_) => DictionaryError::PersistenceError(format!(
                        "Root form '{}' already exists",
                        entry.root().text()
                    )),
                    other => persistence_error(other),
                });
            }
        }

        tx.commit().await.map_err(|e| persistence_error(e.into()))?;
        crate::debug!("Persisted {} dictionary entries", entries.len());
        Ok(())
    }

    /// Get an entry by its identifier
    pub async fn get_dictionary_entry(&self, id: Uuid) -> Result<Option<DictionaryEntry>, DictionaryError> {
        let conn = self.connect().map_err(load_error)?;
        let sql = format!("{} WHERE id = ?1", SELECT_ENTRY_COLUMNS);
        read_single_entry(&conn, &sql, id.to_string()).await.map_err(load_error)
    }

    /// Get the entry whose root form text matches exactly
    pub async fn find_dictionary_entry(&self, root: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        let conn = self.connect().map_err(load_error)?;
        let sql = format!("{} WHERE root_form = ?1", SELECT_ENTRY_COLUMNS);
        read_single_entry(&conn, &sql, root.to_string()).await.map_err(load_error)
    }

    /// List all entries in load order
    pub async fn list_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let conn = self.connect().map_err(load_error)?;
        let sql = format!("{} ORDER BY position", SELECT_ENTRY_COLUMNS);

        let heads = {
            let mut rows = conn.query(&sql, ()).await.map_err(|e| load_error(e.into()))?;
            let mut heads = Vec::new();
            while let Some(row) = rows.next().await.map_err(|e| load_error(e.into()))? {
                heads.push(read_entry_head(&row).map_err(load_error)?);
            }
            heads
        };

        let mut entries = Vec::with_capacity(heads.len());
        for (id, root) in heads {
            let senses = read_senses(&conn, id).await.map_err(load_error)?;
            entries.push(DictionaryEntry::from_parts(id, root, senses));
        }
        Ok(entries)
    }

    /// Delete an entry with its senses and word forms.
    ///
    /// Returns false when no entry has this identifier.
    pub async fn delete_dictionary_entry(&self, id: Uuid) -> Result<bool, DictionaryError> {
        let conn = self.connect().map_err(persistence_error)?;
        let tx = conn.transaction().await.map_err(|e| persistence_error(e.into()))?;

        match delete_entry_rows(&tx, &id.to_string()).await {
            Ok(deleted) => {
                tx.commit().await.map_err(|e| persistence_error(e.into()))?;
                Ok(deleted > 0)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    crate::warn!("Rollback failed after delete error: {}", rollback_err);
                }
                Err(persistence_error(e))
            }
        }
    }
}

#[async_trait]
impl EntryStoreBackend for TursoClient {
    async fn save_entry(&self, entry: &DictionaryEntry) -> Result<(), DictionaryError> {
        self.save_dictionary_entry(entry).await
    }

    async fn save_entries(&self, entries: &[DictionaryEntry]) -> Result<(), DictionaryError> {
        self.save_dictionary_entries(entries).await
    }

    async fn get_entry(&self, id: Uuid) -> Result<Option<DictionaryEntry>, DictionaryError> {
        self.get_dictionary_entry(id).await
    }

    async fn find_by_root(&self, root: &str) -> Result<Option<DictionaryEntry>, DictionaryError> {
        self.find_dictionary_entry(root).await
    }

    async fn list_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        self.list_dictionary_entries().await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<bool, DictionaryError> {
        self.delete_dictionary_entry(id).await
    }
}

fn persistence_error(e: TursoError) -> DictionaryError {
    DictionaryError::PersistenceError(e.to_string())
}

fn load_error(e: TursoError) -> DictionaryError {
    DictionaryError::LoadError(e.to_string())
}

/// Write one aggregate on an open transaction
async fn write_entry(conn: &Connection, entry: &DictionaryEntry, created_at: &str) -> Result<(), TursoError> {
    let id = entry.id().to_string();

    // The upsert only covers the id; a root form used by another entry still
    // fails the UNIQUE constraint.
    conn.execute(
        r#"INSERT INTO dictionary_entry (id, root_form, position, created_at)
           VALUES (?1, ?2, (SELECT COALESCE(MAX(position), 0) + 1 FROM dictionary_entry), ?3)
           ON CONFLICT(id) DO NOTHING"#,
        params![id.clone(), entry.root().text().to_string(), created_at.to_string()],
    )
    .await?;

    delete_children(conn, &id).await?;

    for (sense_pos, sense) in entry.senses().iter().enumerate() {
        conn.execute(
            r#"INSERT INTO word_sense (entry_id, position, definition, part_of_speech)
               VALUES (?1, ?2, ?3, ?4)"#,
            params![
                id.clone(),
                sense_pos as i64,
                sense.definition().map(|d| d.text().to_string()),
                sense.part_of_speech().map(|p| p.label().to_string())
            ],
        )
        .await?;

        for (form_pos, form) in sense.word_forms().iter().enumerate() {
            conn.execute(
                r#"INSERT INTO word_form (entry_id, sense_position, position, form)
                   VALUES (?1, ?2, ?3, ?4)"#,
                params![id.clone(), sense_pos as i64, form_pos as i64, form.text().to_string()],
            )
            .await?;
        }
    }

    Ok(())
}

async fn delete_children(conn: &Connection, id: &str) -> Result<(), TursoError> {
    conn.execute("DELETE FROM word_form WHERE entry_id = ?1", params![id.to_string()])
        .await?;
    conn.execute("DELETE FROM word_sense WHERE entry_id = ?1", params![id.to_string()])
        .await?;
    Ok(())
}

async fn delete_entry_rows(conn: &Connection, id: &str) -> Result<u64, TursoError> {
    delete_children(conn, id).await?;
    let deleted = conn
        .execute("DELETE FROM dictionary_entry WHERE id = ?1", params![id.to_string()])
        .await?;
    Ok(deleted)
}

fn read_entry_head(row: &libsql::Row) -> Result<(Uuid, WordForm), TursoError> {
    let id: String = row.get(0)?;
    let root: String = row.get(1)?;
    let id = Uuid::parse_str(&id).map_err(|e| TursoError::Query(format!("Invalid entry id '{}': {}", id, e)))?;
    Ok((id, WordForm::new(root)))
}

async fn read_single_entry(
    conn: &Connection,
    sql: &str,
    key: String,
) -> Result<Option<DictionaryEntry>, TursoError> {
    let head = {
        let mut rows = conn.query(sql, params![key]).await?;
        match rows.next().await? {
            Some(row) => read_entry_head(&row)?,
            None => return Ok(None),
        }
    };

    let (id, root) = head;
    let senses = read_senses(conn, id).await?;
    Ok(Some(DictionaryEntry::from_parts(id, root, senses)))
}

async fn read_senses(conn: &Connection, id: Uuid) -> Result<Vec<WordSense>, TursoError> {
    let id = id.to_string();

    let mut senses: Vec<(Option<String>, Option<String>, Vec<WordForm>)> = Vec::new();
    {
        let mut rows = conn
            .query(
                "SELECT definition, part_of_speech FROM word_sense WHERE entry_id = ?1 ORDER BY position",
                params![id.clone()],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let definition: Option<String> = row.get(0)?;
            let part_of_speech: Option<String> = row.get(1)?;
            senses.push((definition, part_of_speech, Vec::new()));
        }
    }

    {
        let mut rows = conn
            .query(
                "SELECT sense_position, form FROM word_form WHERE entry_id = ?1 ORDER BY sense_position, position",
                params![id.clone()],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            let sense_pos: i64 = row.get(0)?;
            let form: String = row.get(1)?;
            let slot = usize::try_from(sense_pos)
                .ok()
                .and_then(|pos| senses.get_mut(pos))
                .ok_or_else(|| {
                    TursoError::Query(format!("Word form '{}' references missing sense {}", form, sense_pos))
                })?;
            slot.2.push(WordForm::new(form));
        }
    }

    Ok(senses
        .into_iter()
        .map(|(definition, part_of_speech, forms)| {
            WordSense::from_parts(
                definition.map(Definition::new),
                part_of_speech.map(PartOfSpeech::new),
                forms,
            )
        })
        .collect())
}

#[cfg(test)]
#[path = "entries_test.rs"]
mod tests;
