//! SQLite-backed key-value store.
//!
//! The session log and task collection are persisted as opaque JSON
//! values under well-known keys; the database schema is nothing but the
//! `kv` table. Higher layers go through [`super::Store`], which makes
//! every access best-effort.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::StorageError;

use super::data_dir;

/// Key under which the serialized task collection is stored.
pub const TASKS_KEY: &str = "deepflow_tasks";
/// Key under which the serialized session log is stored.
pub const SESSIONS_KEY: &str = "deepflow_sessions";

/// SQLite database exposing a get/set key-value surface.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/deepflow/deepflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("deepflow.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path (integration tests point
    /// this at a temporary directory).
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
