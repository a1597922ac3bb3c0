//! Cache store that is always unreachable.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheError, CacheStore};

/// Cache store whose every operation fails with a connection error.
///
/// Used to check that the search pipeline degrades to the durable store and
/// external sources when the cache is down.
#[derive(Debug, Default)]
pub struct FailingCacheStore {
    calls: AtomicUsize,
}

impl FailingCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted against this store.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Connection("cache unavailable".to_string()))
    }
}

#[async_trait]
impl CacheStore for FailingCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.fail()
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        self.fail()
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
