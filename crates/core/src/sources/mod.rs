//! External data sources for characters and media.
//!
//! Both sources are black boxes to the pipeline: they return a possibly-empty
//! collection for a query, or an error the pipeline logs and treats as empty.

mod omdb;
mod superhero;

pub use omdb::{OmdbClient, OmdbConfig};
pub use superhero::{SuperheroClient, SuperheroConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::search::{CharacterRecord, MediaRecord};

/// Errors that can occur when talking to an external source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Source not configured (missing credentials, etc.).
    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

/// Source of character records.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Characters matching `query`, in upstream order.
    async fn fetch_characters(&self, query: &str) -> Result<Vec<CharacterRecord>, SourceError>;

    /// Name for logs and metrics labels.
    fn name(&self) -> &'static str;
}

/// Source of media (movie and series) records.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Media matching `query`, in upstream order.
    async fn fetch_media(&self, query: &str) -> Result<Vec<MediaRecord>, SourceError>;

    /// Name for logs and metrics labels.
    fn name(&self) -> &'static str;
}

/// Stand-in for a source whose config section is missing.
#[derive(Debug, Clone)]
pub struct UnconfiguredSource {
    name: &'static str,
}

impl UnconfiguredSource {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl CharacterSource for UnconfiguredSource {
    async fn fetch_characters(&self, _query: &str) -> Result<Vec<CharacterRecord>, SourceError> {
        Err(SourceError::NotConfigured(format!(
            "[sources.{}] is not configured",
            self.name
        )))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[async_trait]
impl MediaSource for UnconfiguredSource {
    async fn fetch_media(&self, _query: &str) -> Result<Vec<MediaRecord>, SourceError> {
        Err(SourceError::NotConfigured(format!(
            "[sources.{}] is not configured",
            self.name
        )))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

fn default_timeout_secs() -> u32 {
    30
}
