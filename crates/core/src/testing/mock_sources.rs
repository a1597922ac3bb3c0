//! Mock character and media sources for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::search::{CharacterRecord, MediaRecord};
use crate::sources::{CharacterSource, MediaSource, SourceError};

/// Mock implementation of the CharacterSource trait.
///
/// Provides controllable behavior for testing:
/// - Return configured characters per exact query
/// - Track queries for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use hunter_core::testing::{MockCharacterSource, fixtures};
///
/// let source = MockCharacterSource::new();
/// source.set_results("Batman", vec![fixtures::character("Batman", "63", "good")]).await;
///
/// let results = source.fetch_characters("Batman").await?;
/// assert_eq!(results.len(), 1);
/// ```
#[derive(Debug)]
pub struct MockCharacterSource {
    /// Characters by exact query.
    results: Arc<RwLock<HashMap<String, Vec<CharacterRecord>>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<String>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<SourceError>>>,
}

impl Default for MockCharacterSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCharacterSource {
    /// Create a new mock that knows no characters.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the characters returned for `query`.
    pub async fn set_results(&self, query: &str, characters: Vec<CharacterRecord>) {
        self.results
            .write()
            .await
            .insert(query.to_string(), characters);
    }

    /// Forget all configured characters.
    pub async fn clear_results(&self) {
        self.results.write().await.clear();
    }

    /// Get all recorded queries, in call order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Make the next fetch fail with `error`.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<SourceError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl CharacterSource for MockCharacterSource {
    async fn fetch_characters(&self, query: &str) -> Result<Vec<CharacterRecord>, SourceError> {
        self.queries.write().await.push(query.to_string());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .results
            .read()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "mock_characters"
    }
}

/// Mock implementation of the MediaSource trait.
///
/// Same behavior as [`MockCharacterSource`], for media records.
#[derive(Debug)]
pub struct MockMediaSource {
    results: Arc<RwLock<HashMap<String, Vec<MediaRecord>>>>,
    queries: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<SourceError>>>,
}

impl Default for MockMediaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMediaSource {
    /// Create a new mock that knows no media.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the media returned for `query`.
    pub async fn set_results(&self, query: &str, media: Vec<MediaRecord>) {
        self.results.write().await.insert(query.to_string(), media);
    }

    /// Forget all configured media.
    pub async fn clear_results(&self) {
        self.results.write().await.clear();
    }

    /// Get all recorded queries, in call order.
    pub async fn recorded_queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Make the next fetch fail with `error`.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<SourceError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    async fn fetch_media(&self, query: &str) -> Result<Vec<MediaRecord>, SourceError> {
        self.queries.write().await.push(query.to_string());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        Ok(self
            .results
            .read()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "mock_media"
    }
}
