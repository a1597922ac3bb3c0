//! SQLite-backed result store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{ResultStore, StoreError};
use crate::search::{CharacterRecord, MediaRecord, ResultSet};

/// SQLite-backed result store.
pub struct SqliteResultStore {
    conn: Mutex<Connection>,
}

impl SqliteResultStore {
    /// Create a new SQLite store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- One row per canonical query; collections stored as JSON arrays
            CREATE TABLE IF NOT EXISTS search_results (
                query TEXT PRIMARY KEY,
                characters TEXT NOT NULL,
                media TEXT NOT NULL,
                stored_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("connection mutex poisoned".to_string()))
    }
}

impl ResultStore for SqliteResultStore {
    fn find(&self, query: &str) -> Result<Option<ResultSet>, StoreError> {
        let conn = self.lock()?;

        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT characters, media FROM search_results WHERE query = ?",
                params![query],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let Some((characters_json, media_json)) = row else {
            return Ok(None);
        };

        let characters: Vec<CharacterRecord> = serde_json::from_str(&characters_json)
            .map_err(|e| StoreError::Corrupt(format!("characters for '{}': {}", query, e)))?;
        let media: Vec<MediaRecord> = serde_json::from_str(&media_json)
            .map_err(|e| StoreError::Corrupt(format!("media for '{}': {}", query, e)))?;

        Ok(Some(ResultSet::new(query, characters, media)))
    }

    fn save(&self, result_set: &ResultSet) -> Result<(), StoreError> {
        let characters = serde_json::to_string(&result_set.characters)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let media = serde_json::to_string(&result_set.media)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO search_results (query, characters, media, stored_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(query) DO UPDATE SET
                characters = excluded.characters,
                media = excluded.media,
                stored_at = excluded.stored_at",
            params![
                &result_set.query,
                &characters,
                &media,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM search_results", [], |row| row.get(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(count as u64)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM search_results", [])
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
