//! Redis-backed cache store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;
use tracing::info;

use super::{CacheError, CacheStore};

/// Cache store backed by a Redis server.
///
/// A single multiplexed connection is opened on first use and shared by all
/// requests.
pub struct RedisCacheStore {
    client: Client,
    conn: OnceCell<MultiplexedConnection>,
}

impl RedisCacheStore {
    /// Create a store for `redis_url` (e.g. "redis://127.0.0.1:6379/0").
    ///
    /// Only the URL is validated here; the connection is opened lazily.
    pub fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client =
            Client::open(redis_url).map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn = self
                    .client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(|e| CacheError::Connection(e.to_string()))?;
                info!("Connected to Redis");
                Ok::<_, CacheError>(conn)
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        // SETEX rejects 0.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
