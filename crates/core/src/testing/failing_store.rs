//! Result store that cannot be trusted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::search::ResultSet;
use crate::store::{ResultStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// Every operation fails as if the database were gone.
    Unavailable,
    /// Reads hit a row that cannot be decoded; writes succeed.
    CorruptRows,
}

/// Result store that fails reads, and optionally writes.
///
/// Used to check that the search pipeline treats a broken durable store as
/// a miss on read and drops the write without failing the request.
#[derive(Debug)]
pub struct FailingResultStore {
    failure: Failure,
    finds: AtomicUsize,
    saves: AtomicUsize,
    saved: Mutex<Vec<String>>,
}

impl FailingResultStore {
    /// Store whose every operation returns `StoreError::Database`.
    pub fn new() -> Self {
        Self::with_failure(Failure::Unavailable)
    }

    /// Store whose reads return `StoreError::Corrupt` but whose writes succeed.
    pub fn corrupt_rows() -> Self {
        Self::with_failure(Failure::CorruptRows)
    }

    fn with_failure(failure: Failure) -> Self {
        Self {
            failure,
            finds: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn find_count(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Queries of the result sets that were accepted by `save`.
    pub fn saved_queries(&self) -> Vec<String> {
        self.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Default for FailingResultStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultStore for FailingResultStore {
    fn find(&self, query: &str) -> Result<Option<ResultSet>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Failure::Unavailable => Err(StoreError::Database("database is locked".to_string())),
            Failure::CorruptRows => Err(StoreError::Corrupt(format!(
                "characters for '{}': expected value at line 1 column 1",
                query
            ))),
        }
    }

    fn save(&self, result_set: &ResultSet) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Failure::Unavailable => Err(StoreError::Database("disk I/O error".to_string())),
            Failure::CorruptRows => {
                if let Ok(mut saved) = self.saved.lock() {
                    saved.push(result_set.query.clone());
                }
                Ok(())
            }
        }
    }

    fn count(&self) -> Result<u64, StoreError> {
        match self.failure {
            Failure::Unavailable => Err(StoreError::Database("database is locked".to_string())),
            Failure::CorruptRows => Ok(self.saved_queries().len() as u64),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self.failure {
            Failure::Unavailable => Err(StoreError::Database("database is locked".to_string())),
            Failure::CorruptRows => {
                if let Ok(mut saved) = self.saved.lock() {
                    saved.clear();
                }
                Ok(())
            }
        }
    }
}
