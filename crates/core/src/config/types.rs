use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::sources::{OmdbConfig, SuperheroConfig};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("hunter.db")
}

/// Available cache backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

/// Cache configuration (result sets and query aliases)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    /// Redis URL (required when backend = "redis"), e.g. "redis://127.0.0.1:6379/0"
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Lifetime of a cached result set (default: 10 minutes)
    #[serde(default = "default_result_ttl")]
    pub result_ttl_secs: u64,
    /// Lifetime of a cached query alias (default: 24 hours)
    #[serde(default = "default_alias_ttl")]
    pub alias_ttl_secs: u64,
    /// How often the memory backend sweeps expired entries (default: 60s)
    #[serde(default = "default_purge_interval")]
    pub purge_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: None,
            result_ttl_secs: default_result_ttl(),
            alias_ttl_secs: default_alias_ttl(),
            purge_interval_secs: default_purge_interval(),
        }
    }
}

fn default_result_ttl() -> u64 {
    10 * 60
}

fn default_alias_ttl() -> u64 {
    24 * 60 * 60
}

fn default_purge_interval() -> u64 {
    60
}

/// Search request defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Page size used when the request has no valid `limit`
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    crate::search::DEFAULT_PAGE_LIMIT
}

/// Name corpus used for fuzzy fallback
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// JSON file containing an array of names
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("hero_names.json")
}

/// External data sources
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub superhero: Option<SuperheroConfig>,
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: SanitizedCacheConfig,
    pub search: SearchConfig,
    pub corpus: CorpusConfig,
    pub sources: SanitizedSourcesConfig,
}

/// Sanitized cache config (Redis URL may embed a password)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCacheConfig {
    pub backend: String,
    pub redis_url_configured: bool,
    pub result_ttl_secs: u64,
    pub alias_ttl_secs: u64,
    pub purge_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourcesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superhero: Option<SanitizedSourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omdb: Option<SanitizedSourceConfig>,
}

/// Sanitized source config (credential hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub credential_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            cache: SanitizedCacheConfig {
                backend: match config.cache.backend {
                    CacheBackend::Memory => "memory".to_string(),
                    CacheBackend::Redis => "redis".to_string(),
                },
                redis_url_configured: config
                    .cache
                    .redis_url
                    .as_ref()
                    .is_some_and(|u| !u.is_empty()),
                result_ttl_secs: config.cache.result_ttl_secs,
                alias_ttl_secs: config.cache.alias_ttl_secs,
                purge_interval_secs: config.cache.purge_interval_secs,
            },
            search: config.search.clone(),
            corpus: config.corpus.clone(),
            sources: SanitizedSourcesConfig {
                superhero: config.sources.superhero.as_ref().map(|s| SanitizedSourceConfig {
                    base_url: s.base_url.clone(),
                    credential_configured: !s.access_token.is_empty(),
                    timeout_secs: s.timeout_secs,
                }),
                omdb: config.sources.omdb.as_ref().map(|o| SanitizedSourceConfig {
                    base_url: o.base_url.clone(),
                    credential_configured: !o.api_key.is_empty(),
                    timeout_secs: o.timeout_secs,
                }),
            },
        }
    }
}
