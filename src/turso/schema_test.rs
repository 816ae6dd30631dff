// Tests for schema initialization
// Test cases:
// - fresh database records the current version and creates the tables
// - initializing twice is a no-op
// - a database from a newer schema version is rejected

use super::*;
use tempfile::TempDir;

async fn setup_client() -> (TursoClient, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let client = TursoClient::new(temp_dir.path().to_path_buf())
        .await
        .expect("Failed to create client");
    (client, temp_dir)
}

async fn table_exists(client: &TursoClient, name: &str) -> bool {
    let conn = client.connect().unwrap();
    let mut rows = conn
        .query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            libsql::params![name.to_string()],
        )
        .await
        .unwrap();
    rows.next().await.unwrap().is_some()
}

#[tokio::test]
async fn test_initialize_fresh_database() {
    let (client, _temp) = setup_client().await;

    initialize_schema(&client).await.expect("Failed to initialize schema");

    assert_eq!(get_schema_version(&client).await.unwrap(), SCHEMA_VERSION);
    for table in ["dictionary_entry", "word_sense", "word_form"] {
        assert!(table_exists(&client, table).await, "missing table {}", table);
    }
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let (client, _temp) = setup_client().await;

    initialize_schema(&client).await.unwrap();
    initialize_schema(&client).await.unwrap();

    assert_eq!(get_schema_version(&client).await.unwrap(), SCHEMA_VERSION);
}

#[tokio::test]
async fn test_newer_schema_version_is_rejected() {
    let (client, _temp) = setup_client().await;
    initialize_schema(&client).await.unwrap();

    client
        .execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            libsql::params![SCHEMA_VERSION + 1],
        )
        .await
        .unwrap();

    match initialize_schema(&client).await {
        Err(TursoError::Schema(msg)) => assert!(msg.contains("newer")),
        other => panic!("Expected Schema error, got {:?}", other),
    }
}
