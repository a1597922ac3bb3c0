//! SuperHero API client.
//!
//! The access token is part of the URL path: `{base}/{token}/search/{name}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{default_timeout_secs, CharacterSource, SourceError};
use crate::search::CharacterRecord;

const DEFAULT_BASE_URL: &str = "https://superheroapi.com/api";

/// SuperHero API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperheroConfig {
    /// Access token (required).
    pub access_token: String,
    /// Base URL (default: https://superheroapi.com/api).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

/// SuperHero API client.
pub struct SuperheroClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl SuperheroClient {
    /// Create a new SuperHero API client.
    pub fn new(config: SuperheroConfig) -> Result<Self, SourceError> {
        if config.access_token.is_empty() {
            return Err(SourceError::NotConfigured(
                "SuperHero API access token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token,
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/{}/search/{}",
            self.base_url,
            self.access_token,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl CharacterSource for SuperheroClient {
    async fn fetch_characters(&self, query: &str) -> Result<Vec<CharacterRecord>, SourceError> {
        debug!("SuperHero search: query='{}'", query);

        let response = self.client.get(self.search_url(query)).send().await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(SourceError::NotConfigured(
                "Invalid SuperHero API access token".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let search_result: SuperheroSearchResponse = response.json().await.map_err(|e| {
            SourceError::ParseError(format!("Failed to parse character search response: {}", e))
        })?;

        let characters = search_result.into_records();
        debug!(
            "SuperHero search for '{}' returned {} characters",
            query,
            characters.len()
        );
        Ok(characters)
    }

    fn name(&self) -> &'static str {
        "superhero"
    }
}

// API response types

#[derive(Debug, Deserialize)]
struct SuperheroSearchResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    results: Vec<SuperheroResult>,
}

impl SuperheroSearchResponse {
    /// Anything but `"success"` (e.g. "character with given name not found")
    /// means no characters.
    fn into_records(self) -> Vec<CharacterRecord> {
        if self.response != "success" {
            return Vec::new();
        }
        self.results.into_iter().map(|r| r.into()).collect()
    }
}

#[derive(Debug, Deserialize)]
struct SuperheroResult {
    name: String,
    #[serde(default)]
    powerstats: Powerstats,
    #[serde(default)]
    biography: Biography,
    #[serde(default)]
    image: Image,
}

#[derive(Debug, Default, Deserialize)]
struct Powerstats {
    #[serde(default)]
    power: String,
}

#[derive(Debug, Default, Deserialize)]
struct Biography {
    #[serde(default)]
    alignment: String,
}

#[derive(Debug, Default, Deserialize)]
struct Image {
    #[serde(default)]
    url: String,
}

impl From<SuperheroResult> for CharacterRecord {
    fn from(r: SuperheroResult) -> Self {
        Self {
            name: r.name,
            image: r.image.url,
            power: r.powerstats.power,
            alignment: r.biography.alignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str) -> SuperheroConfig {
        SuperheroConfig {
            access_token: token.to_string(),
            base_url: Some("http://localhost:9999/api/".to_string()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_requires_access_token() {
        let result = SuperheroClient::new(config(""));
        assert!(matches!(result, Err(SourceError::NotConfigured(_))));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let client = SuperheroClient::new(config("tok123")).unwrap();
        assert_eq!(
            client.search_url("spider man"),
            "http://localhost:9999/api/tok123/search/spider%20man"
        );
    }

    #[test]
    fn test_parse_success_response() {
        let body = r#"{
            "response": "success",
            "results-for": "batman",
            "results": [{
                "id": "69",
                "name": "Batman",
                "powerstats": {"intelligence": "81", "power": "63"},
                "biography": {"full-name": "Terry McGinnis", "alignment": "good"},
                "image": {"url": "https://img/10441.jpg"}
            }, {
                "id": "70",
                "name": "Batman II",
                "powerstats": {"power": "null"},
                "biography": {"alignment": "good"},
                "image": {"url": "https://img/76.jpg"}
            }]
        }"#;
        let parsed: SuperheroSearchResponse = serde_json::from_str(body).unwrap();
        let records = parsed.into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Batman");
        assert_eq!(records[0].image, "https://img/10441.jpg");
        assert_eq!(records[0].power, "63");
        assert_eq!(records[0].alignment, "good");
        assert_eq!(records[1].power, "null");
        assert_eq!(records[1].power_value(), None);
    }

    #[test]
    fn test_parse_error_response_is_empty() {
        let body = r#"{"response": "error", "error": "character with given name not found"}"#;
        let parsed: SuperheroSearchResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.into_records().is_empty());
    }

    #[test]
    fn test_config_default_timeout() {
        let config: SuperheroConfig = toml::from_str(r#"access_token = "abc""#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert!(config.base_url.is_none());
    }
}
