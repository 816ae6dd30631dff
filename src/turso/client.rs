// Turso client - owns the embedded libsql database
//
// A connection is opened per operation and dropped when the operation returns.

use libsql::{Builder, Connection, Database};
use std::path::{Path, PathBuf};

/// File name of the database inside the data directory
pub const DATABASE_FILE: &str = "lexicon.db";

/// Errors raised by the storage layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TursoError {
    /// Database could not be opened or connected
    #[error("Database connection failed: {0}")]
    Connection(String),
    /// Statement failed to execute or a row could not be decoded
    #[error("Query failed: {0}")]
    Query(String),
    /// Statement violated a UNIQUE, PRIMARY KEY or FOREIGN KEY constraint
    #[error("Constraint violation: {0}")]
    Constraint(String),
    /// Stored schema is not usable by this build
    #[error("Schema error: {0}")]
    Schema(String),
}

impl From<libsql::Error> for TursoError {
    fn from(e: libsql::Error) -> Self {
        let msg = e.to_string();
        if msg.contains("constraint failed") {
            TursoError::Constraint(msg)
        } else {
            TursoError::Query(msg)
        }
    }
}

/// Client for the embedded dictionary database
pub struct TursoClient {
    db: Database,
    db_path: PathBuf,
}

impl std::fmt::Debug for TursoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TursoClient")
            .field("db_path", &self.db_path)
            .finish()
    }
}

impl TursoClient {
    /// Open (or create) the database inside `data_dir`
    pub async fn new(data_dir: PathBuf) -> Result<Self, TursoError> {
        tokio::fs::create_dir_all(&data_dir).await.map_err(|e| {
            TursoError::Connection(format!("Failed to create {:?}: {}", data_dir, e))
        })?;

        let db_path = data_dir.join(DATABASE_FILE);
        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| TursoError::Connection(e.to_string()))?;

        crate::debug!("Opened database at {:?}", db_path);
        Ok(Self { db, db_path })
    }

    /// Path of the database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection for one operation
    pub fn connect(&self) -> Result<Connection, TursoError> {
        self.db
            .connect()
            .map_err(|e| TursoError::Connection(e.to_string()))
    }

    /// Execute a single statement on its own connection
    pub async fn execute(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<u64, TursoError> {
        let conn = self.connect()?;
        Ok(conn.execute(sql, params).await?)
    }
}
