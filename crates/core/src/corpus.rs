//! Known-name corpus used as fuzzy match candidates.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

/// Errors loading the name corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus file {path} is not a JSON array of strings: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the ordered list of known names.
///
/// Order is significant: fuzzy ties resolve to the earliest name.
#[async_trait]
pub trait NameCorpus: Send + Sync {
    async fn load(&self) -> Result<Arc<Vec<String>>, CorpusError>;
}

/// Corpus read from a JSON array of strings on first use.
///
/// A successful load is kept for the life of the process; a failed one is
/// retried on the next call.
#[derive(Debug)]
pub struct JsonFileCorpus {
    path: PathBuf,
    names: OnceCell<Arc<Vec<String>>>,
}

impl JsonFileCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            names: OnceCell::new(),
        }
    }

    async fn read(&self) -> Result<Arc<Vec<String>>, CorpusError> {
        let path = self.path.display().to_string();
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CorpusError::Io {
                path: path.clone(),
                source,
            })?;
        let names: Vec<String> =
            serde_json::from_str(&raw).map_err(|source| CorpusError::Parse { path, source })?;

        info!(
            "Loaded {} names from corpus {}",
            names.len(),
            self.path.display()
        );
        Ok(Arc::new(names))
    }
}

#[async_trait]
impl NameCorpus for JsonFileCorpus {
    async fn load(&self) -> Result<Arc<Vec<String>>, CorpusError> {
        self.names
            .get_or_try_init(|| self.read())
            .await
            .map(Arc::clone)
    }
}

/// Corpus held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    names: Arc<Vec<String>>,
}

impl StaticCorpus {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Arc::new(names.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl NameCorpus for StaticCorpus {
    async fn load(&self) -> Result<Arc<Vec<String>>, CorpusError> {
        Ok(Arc::clone(&self.names))
    }
}
