//! Durable store of result sets.
//!
//! Checked after the cache misses and written after every successful external
//! fetch, so a restart does not send every query back to the external APIs.

mod sqlite;

pub use sqlite::SqliteResultStore;

use thiserror::Error;

use crate::search::ResultSet;

/// Errors for result store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Trait for durable result set storage.
pub trait ResultStore: Send + Sync {
    /// Find the result set stored under exactly this canonical query.
    fn find(&self, query: &str) -> Result<Option<ResultSet>, StoreError>;

    /// Store a result set under `result_set.query`, replacing any previous one.
    fn save(&self, result_set: &ResultSet) -> Result<(), StoreError>;

    /// Number of stored result sets.
    fn count(&self) -> Result<u64, StoreError>;

    /// Remove every stored result set.
    fn clear(&self) -> Result<(), StoreError>;
}
