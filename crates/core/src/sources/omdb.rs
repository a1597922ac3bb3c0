//! OMDb API client.
//!
//! Media results combine a movie search and a series search for the same
//! title; movies come first.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{default_timeout_secs, MediaSource, SourceError};
use crate::search::MediaRecord;

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

/// OMDb media kind, passed as the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, SourceError> {
        if config.api_key.is_empty() {
            return Err(SourceError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn search(&self, query: &str, kind: MediaKind) -> Result<Vec<MediaRecord>, SourceError> {
        debug!("OMDb {} search: query='{}'", kind.as_str(), query);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("s", query),
                ("type", kind.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(SourceError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: OmdbSearchResponse = response.json().await.map_err(|e| {
            SourceError::ParseError(format!(
                "Failed to parse {} search response: {}",
                kind.as_str(),
                e
            ))
        })?;

        Ok(search_result.into_records())
    }
}

#[async_trait]
impl MediaSource for OmdbClient {
    async fn fetch_media(&self, query: &str) -> Result<Vec<MediaRecord>, SourceError> {
        let (movies, series) = tokio::join!(
            self.search(query, MediaKind::Movie),
            self.search(query, MediaKind::Series)
        );
        combine(query, movies, series)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

/// Movies then series. A failed half is logged and contributes nothing;
/// the call fails only when both halves fail.
fn combine(
    query: &str,
    movies: Result<Vec<MediaRecord>, SourceError>,
    series: Result<Vec<MediaRecord>, SourceError>,
) -> Result<Vec<MediaRecord>, SourceError> {
    match (movies, series) {
        (Ok(mut movies), Ok(series)) => {
            movies.extend(series);
            Ok(movies)
        }
        (Ok(movies), Err(e)) => {
            warn!("OMDb series search for '{}' failed: {}", query, e);
            Ok(movies)
        }
        (Err(e), Ok(series)) => {
            warn!("OMDb movie search for '{}' failed: {}", query, e);
            Ok(series)
        }
        (Err(movie_err), Err(series_err)) => {
            warn!("OMDb series search for '{}' failed: {}", query, series_err);
            Err(movie_err)
        }
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
}

impl OmdbSearchResponse {
    /// `"False"` responses ("Movie not found!") mean no results.
    fn into_records(self) -> Vec<MediaRecord> {
        if self.response != "True" {
            return Vec::new();
        }
        self.search.into_iter().map(|item| item.into()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Year", default)]
    year: String,
}

impl From<OmdbSearchItem> for MediaRecord {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            title: item.title,
            poster: item.poster,
            year: item.year,
        }
    }
}
