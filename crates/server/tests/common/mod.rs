//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock sources injected, enabling E2E testing of the HTTP API without
//! network access.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use hunter_core::{
    CacheStore, CharacterSource, Config, DatabaseConfig, MediaSource, MemoryCacheStore,
    NameCorpus, ResultStore, SearchCache, SearchOrchestrator, ServerConfig, SqliteResultStore,
    StaticCorpus,
    config::SearchConfig,
    testing::{MockCharacterSource, MockMediaSource},
};

/// Re-export fixtures for test convenience
pub use hunter_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with fully controllable mocks for:
/// - Character search (MockCharacterSource)
/// - Media search (MockMediaSource)
///
/// The cache and store are real (in-memory cache, SQLite in a temp dir) so
/// tests can inspect what a request persisted.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.characters.set_results("Batman", vec![fixtures::character("Batman", "63", "good")]).await;
///
///     let response = fixture.get("/api/search?query=Batman").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock character source - configure character results
    pub characters: Arc<MockCharacterSource>,
    /// Mock media source - configure media results
    pub media: Arc<MockMediaSource>,
    /// Cache store backing the orchestrator
    pub cache_store: Arc<MemoryCacheStore>,
    /// Durable store backing the orchestrator
    pub store: Arc<SqliteResultStore>,
    /// Temporary directory for test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        // Create mocks
        let characters = Arc::new(MockCharacterSource::new());
        let media = Arc::new(MockMediaSource::new());

        // Create config
        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            search: SearchConfig {
                default_limit: test_config.default_limit,
            },
            ..Default::default()
        };

        // Create stores
        let cache_store = Arc::new(MemoryCacheStore::new());
        let store = Arc::new(
            SqliteResultStore::new(&db_path).expect("Failed to create result store"),
        );
        let cache = SearchCache::new(
            Arc::clone(&cache_store) as Arc<dyn CacheStore>,
            Duration::from_secs(config.cache.result_ttl_secs),
            Duration::from_secs(config.cache.alias_ttl_secs),
        );

        let corpus: Arc<dyn NameCorpus> = match test_config.corpus {
            Some(names) => Arc::new(StaticCorpus::new(names)),
            None => Arc::new(hunter_core::JsonFileCorpus::new(
                temp_dir.path().join("missing_corpus.json"),
            )),
        };

        let orchestrator = SearchOrchestrator::new(
            cache,
            Arc::clone(&store) as Arc<dyn ResultStore>,
            Arc::clone(&characters) as Arc<dyn CharacterSource>,
            Arc::clone(&media) as Arc<dyn MediaSource>,
            corpus,
        );

        // Create app state with mocks
        let state = Arc::new(hunter_server::state::AppState::new(config, orchestrator));

        // Create router
        let router = hunter_server::api::create_router(state);

        Self {
            router,
            characters,
            media,
            cache_store,
            store,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Names for the fuzzy fallback. `None` points the corpus at a missing
    /// file so any fallback fails.
    pub corpus: Option<Vec<String>>,
    /// Page size when a request has no valid limit
    pub default_limit: usize,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            corpus: Some(vec![
                "Batman".to_string(),
                "Superman".to_string(),
                "Wonder Woman".to_string(),
            ]),
            default_limit: hunter_core::DEFAULT_PAGE_LIMIT,
        }
    }
}

impl TestConfig {
    /// Create config whose corpus cannot be loaded.
    pub fn with_broken_corpus() -> Self {
        Self {
            corpus: None,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}
