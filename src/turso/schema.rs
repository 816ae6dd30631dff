// Database schema definitions and version tracking
//
// This module defines the SQLite schema for dictionary entries, their senses
// and word forms, and records the schema version the database was created with.

use super::client::{TursoClient, TursoError};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL statements to create all tables (each as a separate string)
const CREATE_TABLES: &[&str] = &[
    // Entries, ordered by an explicit load sequence
    r#"CREATE TABLE IF NOT EXISTS dictionary_entry (
        id TEXT PRIMARY KEY,
        root_form TEXT UNIQUE NOT NULL,
        position INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE INDEX IF NOT EXISTS idx_dictionary_entry_position ON dictionary_entry(position)"#,
    // Senses owned by an entry
    r#"CREATE TABLE IF NOT EXISTS word_sense (
        entry_id TEXT NOT NULL,
        position INTEGER NOT NULL,
        definition TEXT,
        part_of_speech TEXT,
        PRIMARY KEY (entry_id, position),
        FOREIGN KEY (entry_id) REFERENCES dictionary_entry(id) ON DELETE CASCADE
    )"#,
    // Word forms owned by a sense
    r#"CREATE TABLE IF NOT EXISTS word_form (
        entry_id TEXT NOT NULL,
        sense_position INTEGER NOT NULL,
        position INTEGER NOT NULL,
        form TEXT NOT NULL,
        PRIMARY KEY (entry_id, sense_position, position),
        FOREIGN KEY (entry_id, sense_position)
            REFERENCES word_sense(entry_id, position) ON DELETE CASCADE
    )"#,
];

/// Initialize the database schema.
///
/// Creates all tables if they don't exist. A database written by a newer
/// schema version is rejected rather than modified.
pub async fn initialize_schema(client: &TursoClient) -> Result<(), TursoError> {
    // First, ensure schema_version table exists (needed for version checking)
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            (),
        )
        .await?;

    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        crate::info!("Initializing dictionary schema (version {})", SCHEMA_VERSION);

        let conn = client.connect()?;
        let tx = conn.transaction().await?;
        for statement in CREATE_TABLES {
            tx.execute(statement, ()).await?;
        }
        tx.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            libsql::params![SCHEMA_VERSION],
        )
        .await?;
        tx.commit().await?;

        crate::info!("Dictionary schema initialized successfully");
    } else if current_version > SCHEMA_VERSION {
        return Err(TursoError::Schema(format!(
            "database schema version {} is newer than supported version {}",
            current_version, SCHEMA_VERSION
        )));
    } else {
        crate::debug!("Dictionary schema is up to date (version {})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database.
/// Returns 0 if no version has been recorded yet.
pub(crate) async fn get_schema_version(client: &TursoClient) -> Result<i32, TursoError> {
    let conn = client.connect()?;
    let mut rows = conn
        .query(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            (),
        )
        .await?;

    match rows.next().await? {
        Some(row) => Ok(row.get::<i32>(0)?),
        None => Ok(0),
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
