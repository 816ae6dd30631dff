// Turso/libsql persistence - embedded SQLite client, schema and entry repository

mod client;
mod entries;
mod schema;

pub use client::{TursoClient, TursoError};
pub use schema::{initialize_schema, SCHEMA_VERSION};
