//! Expiring key/value cache for search results and query aliases.
//!
//! `CacheStore` is the raw string store (in-memory or Redis). `SearchCache`
//! layers the key scheme, TTL policy and JSON encoding on top of it.

mod memory;
mod redis_store;

pub use self::memory::MemoryCacheStore;
pub use self::redis_store::RedisCacheStore;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::CacheConfig;
use crate::search::ResultSet;

/// Prefix for cached result sets, keyed by canonical query.
pub const RESULT_KEY_PREFIX: &str = "search:";
/// Prefix for cached aliases, keyed by the query the user typed.
pub const ALIAS_KEY_PREFIX: &str = "closest_match:";

/// Errors for cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache command error: {0}")]
    Command(String),

    #[error("Cache entry could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key/value store with per-entry expiration.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a live entry. Expired entries are reported as `None`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Insert or overwrite an entry that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Backend name for logs and status output.
    fn backend_name(&self) -> &'static str;
}

/// Typed view of a `CacheStore` for the search pipeline.
#[derive(Clone)]
pub struct SearchCache {
    store: Arc<dyn CacheStore>,
    result_ttl: Duration,
    alias_ttl: Duration,
}

impl SearchCache {
    pub fn new(store: Arc<dyn CacheStore>, result_ttl: Duration, alias_ttl: Duration) -> Self {
        Self {
            store,
            result_ttl,
            alias_ttl,
        }
    }

    pub fn from_config(store: Arc<dyn CacheStore>, config: &CacheConfig) -> Self {
        Self::new(
            store,
            Duration::from_secs(config.result_ttl_secs),
            Duration::from_secs(config.alias_ttl_secs),
        )
    }

    pub fn result_key(query: &str) -> String {
        format!("{}{}", RESULT_KEY_PREFIX, query)
    }

    pub fn alias_key(query: &str) -> String {
        format!("{}{}", ALIAS_KEY_PREFIX, query)
    }

    pub fn result_ttl(&self) -> Duration {
        self.result_ttl
    }

    pub fn alias_ttl(&self) -> Duration {
        self.alias_ttl
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Cached result set for a canonical query.
    pub async fn get_result_set(&self, query: &str) -> Result<Option<ResultSet>, CacheError> {
        let Some(raw) = self.store.get(&Self::result_key(query)).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Cache a result set under its own canonical query.
    pub async fn put_result_set(&self, result_set: &ResultSet) -> Result<(), CacheError> {
        let raw = serde_json::to_string(result_set)?;
        debug!(
            "Caching result set for '{}' ({} characters, {} media)",
            result_set.query,
            result_set.characters.len(),
            result_set.media.len()
        );
        self.store
            .set(&Self::result_key(&result_set.query), &raw, self.result_ttl)
            .await
    }

    /// Canonical query previously resolved for `query`, if any.
    pub async fn get_alias(&self, query: &str) -> Result<Option<String>, CacheError> {
        self.store.get(&Self::alias_key(query)).await
    }

    /// Remember that `original` resolved to `canonical`.
    pub async fn put_alias(&self, original: &str, canonical: &str) -> Result<(), CacheError> {
        self.store
            .set(&Self::alias_key(original), canonical, self.alias_ttl)
            .await
    }
}
