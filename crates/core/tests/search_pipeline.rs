//! Search pipeline integration tests.
//!
//! These tests drive the orchestrator over a real in-memory cache and an
//! on-disk SQLite store, with mock sources:
//! - Tier order (alias -> cache -> store -> fetch)
//! - Nearest-name fallback and alias persistence
//! - Filtering and pagination of cached and fetched results
//! - Degradation when dependencies fail

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use hunter_core::{
    testing::{fixtures, MockCharacterSource, MockMediaSource},
    CacheStore, CharacterFilter, CharacterSource, JsonFileCorpus, MediaSource, MemoryCacheStore,
    NameCorpus, ResultStore, SearchCache, SearchError, SearchOrchestrator, SearchRequest,
    SourceError, SqliteResultStore, StaticCorpus,
};

/// Test helper wiring an orchestrator to inspectable collaborators.
struct TestHarness {
    orchestrator: SearchOrchestrator,
    cache_store: Arc<MemoryCacheStore>,
    store: Arc<SqliteResultStore>,
    characters: Arc<MockCharacterSource>,
    media: Arc<MockMediaSource>,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new(corpus: &[&str]) -> Self {
        Self::with_corpus(Arc::new(StaticCorpus::new(corpus.iter().copied())))
    }

    fn with_corpus(corpus: Arc<dyn NameCorpus>) -> Self {
        Self::with_ttls(corpus, Duration::from_secs(600), Duration::from_secs(86_400))
    }

    fn with_ttls(corpus: Arc<dyn NameCorpus>, result_ttl: Duration, alias_ttl: Duration) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(SqliteResultStore::new(&temp_dir.path().join("results.db")).unwrap());
        let cache_store = Arc::new(MemoryCacheStore::new());
        let characters = Arc::new(MockCharacterSource::new());
        let media = Arc::new(MockMediaSource::new());

        let cache = SearchCache::new(
            Arc::clone(&cache_store) as Arc<dyn CacheStore>,
            result_ttl,
            alias_ttl,
        );

        let orchestrator = SearchOrchestrator::new(
            cache,
            Arc::clone(&store) as Arc<dyn ResultStore>,
            Arc::clone(&characters) as Arc<dyn CharacterSource>,
            Arc::clone(&media) as Arc<dyn MediaSource>,
            corpus,
        );

        Self {
            orchestrator,
            cache_store,
            store,
            characters,
            media,
            _temp_dir: temp_dir,
        }
    }

    async fn search(&self, request: SearchRequest) -> hunter_core::Page {
        self.orchestrator.search(&request).await.unwrap()
    }

    async fn fetch_count(&self) -> usize {
        self.characters.query_count().await + self.media.query_count().await
    }
}

#[tokio::test]
async fn test_everything_empty_persists_nothing() {
    let h = TestHarness::new(&[]);

    let page = h.search(SearchRequest::new("Nobody")).await;

    assert!(page.characters.is_empty());
    assert!(page.media.is_empty());
    assert_eq!(page.total_pages, 0);
    assert_eq!(h.store.count().unwrap(), 0);
    assert!(h.cache_store.is_empty().await);
}

#[tokio::test]
async fn test_fuzzy_miss_with_empty_refetch_persists_nothing() {
    let h = TestHarness::new(&["Batman", "Superman"]);

    let page = h.search(SearchRequest::new("Batmon")).await;

    assert_eq!(page.total_pages, 0);
    assert_eq!(
        h.characters.recorded_queries().await,
        vec!["Batmon", "Batman"]
    );
    assert_eq!(h.store.count().unwrap(), 0);
    assert!(h.cache_store.is_empty().await);
}

#[tokio::test]
async fn test_store_hit_populates_cache() {
    let h = TestHarness::new(&[]);
    h.store
        .save(&fixtures::result_set("Superman", 2, 1))
        .unwrap();

    let page = h.search(SearchRequest::new("Superman")).await;

    assert_eq!(page.characters.len(), 2);
    assert_eq!(page.media.len(), 1);
    assert_eq!(h.fetch_count().await, 0);
    assert!(h
        .cache_store
        .get("search:Superman")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_cache_hit_skips_store_and_sources() {
    let h = TestHarness::new(&[]);
    h.orchestrator
        .cache()
        .put_result_set(&fixtures::result_set("Flash", 1, 0))
        .await
        .unwrap();

    let page = h.search(SearchRequest::new("Flash")).await;

    assert_eq!(page.characters.len(), 1);
    assert_eq!(h.fetch_count().await, 0);
    assert_eq!(h.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_fuzzy_resolution_then_alias_hit() {
    let h = TestHarness::new(&["Batman", "Superman"]);
    h.characters
        .set_results("Batman", vec![fixtures::character("Batman", "63", "good")])
        .await;
    h.media
        .set_results("Batman", vec![fixtures::media("Batman Begins", "2005")])
        .await;

    let first = h.search(SearchRequest::new("Batmon")).await;
    assert_eq!(first.characters[0].name, "Batman");
    assert_eq!(first.media[0].title, "Batman Begins");

    let stored = h.store.find("Batman").unwrap().unwrap();
    assert_eq!(stored.query, "Batman");
    assert_eq!(
        h.orchestrator
            .cache()
            .get_alias("Batmon")
            .await
            .unwrap()
            .as_deref(),
        Some("Batman")
    );

    // The typo now resolves through the alias straight to the cached set.
    let fetches_before = h.fetch_count().await;
    let second = h.search(SearchRequest::new("Batmon")).await;
    assert_eq!(second, first);
    assert_eq!(h.fetch_count().await, fetches_before);
}

#[tokio::test]
async fn test_stale_alias_falls_through_to_store() {
    let h = TestHarness::new(&[]);
    h.orchestrator
        .cache()
        .put_alias("Supermen", "Superman")
        .await
        .unwrap();
    h.store
        .save(&fixtures::result_set("Superman", 1, 1))
        .unwrap();

    let page = h.search(SearchRequest::new("Supermen")).await;

    assert_eq!(page.characters[0].name, "Superman 1");
    assert_eq!(h.fetch_count().await, 0);
}

#[tokio::test]
async fn test_stale_alias_refetches_canonical_name() {
    let h = TestHarness::new(&["Superman"]);
    h.orchestrator
        .cache()
        .put_alias("Supermen", "Superman")
        .await
        .unwrap();
    h.characters
        .set_results(
            "Superman",
            vec![fixtures::character("Superman", "100", "good")],
        )
        .await;

    let page = h.search(SearchRequest::new("Supermen")).await;

    assert_eq!(page.characters[0].name, "Superman");
    assert_eq!(h.characters.recorded_queries().await, vec!["Superman"]);
    assert!(h.store.find("Superman").unwrap().is_some());
}

#[tokio::test]
async fn test_filter_applies_on_cache_hit() {
    let h = TestHarness::new(&[]);
    h.orchestrator
        .cache()
        .put_result_set(&hunter_core::ResultSet::new(
            "Bat",
            vec![
                fixtures::character("Batman", "47", "good"),
                fixtures::character("Batgirl", "28", "good"),
                fixtures::character("Bat-Mite", "null", "neutral"),
                fixtures::character("Man-Bat", "39", "bad"),
            ],
            vec![fixtures::media("Batman Returns", "1992")],
        ))
        .await
        .unwrap();

    let filter = CharacterFilter::from_raw(30, 50, "good");
    let page = h
        .search(SearchRequest::new("Bat").with_filter(filter))
        .await;

    let names: Vec<_> = page.characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Batman"]);
    assert_eq!(page.media.len(), 1);
    assert_eq!(page.total_pages, 1);

    // Unfiltered request still sees the full cached set.
    let page = h.search(SearchRequest::new("Bat")).await;
    assert_eq!(page.characters.len(), 4);
}

#[tokio::test]
async fn test_fetched_characters_persisted_after_filter() {
    let h = TestHarness::new(&[]);
    h.characters
        .set_results(
            "Spider",
            vec![
                fixtures::character("Spider-Man", "58", "good"),
                fixtures::character("Spider-Woman", "null", "good"),
            ],
        )
        .await;

    let filter = CharacterFilter::default().with_power_min(Some(10));
    let page = h
        .search(SearchRequest::new("Spider").with_filter(filter))
        .await;
    assert_eq!(page.characters.len(), 1);

    let stored = h.store.find("Spider").unwrap().unwrap();
    assert_eq!(stored.characters.len(), 1);
    assert_eq!(stored.characters[0].name, "Spider-Man");
}

#[tokio::test]
async fn test_pagination_through_pipeline() {
    let h = TestHarness::new(&[]);
    h.characters
        .set_results(
            "X",
            ["A", "B", "C", "D", "E"]
                .iter()
                .map(|n| fixtures::character(n, "50", "good"))
                .collect(),
        )
        .await;
    h.media
        .set_results(
            "X",
            vec![fixtures::media("M1", "2001"), fixtures::media("M2", "2002")],
        )
        .await;

    let page = h
        .search(SearchRequest::new("X").with_page(2).with_limit(3))
        .await;

    let names: Vec<_> = page.characters.iter().map(|c| c.name.as_str()).collect();
    let titles: Vec<_> = page.media.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(names, vec!["D", "E"]);
    assert_eq!(titles, vec!["M1"]);
    assert_eq!(page.total_pages, 3);

    let past_end = h
        .search(SearchRequest::new("X").with_page(9).with_limit(3))
        .await;
    assert!(past_end.characters.is_empty());
    assert!(past_end.media.is_empty());
    assert_eq!(past_end.total_pages, 3);
}

#[tokio::test]
async fn test_media_only_results_are_persisted() {
    let h = TestHarness::new(&[]);
    h.media
        .set_results("Gotham", vec![fixtures::media("Gotham", "2014–2019")])
        .await;

    let page = h.search(SearchRequest::new("Gotham")).await;

    assert!(page.characters.is_empty());
    assert_eq!(page.media.len(), 1);
    assert!(h.store.find("Gotham").unwrap().is_some());
}

#[tokio::test]
async fn test_both_sources_failing_yields_empty_page() {
    let h = TestHarness::new(&[]);
    h.characters
        .set_next_error(SourceError::NotConfigured("superhero".to_string()))
        .await;
    h.media
        .set_next_error(SourceError::NotConfigured("omdb".to_string()))
        .await;

    let page = h.search(SearchRequest::new("Batman")).await;

    assert_eq!(page.total_pages, 0);
    assert_eq!(h.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_corpus_failure_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = Arc::new(JsonFileCorpus::new(temp_dir.path().join("missing.json")));
    let h = TestHarness::with_corpus(corpus);

    let result = h.orchestrator.search(&SearchRequest::new("Batmon")).await;

    assert!(matches!(result, Err(SearchError::Corpus(_))));
    assert_eq!(h.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_corpus_not_loaded_when_characters_found() {
    let temp_dir = TempDir::new().unwrap();
    let corpus = Arc::new(JsonFileCorpus::new(temp_dir.path().join("missing.json")));
    let h = TestHarness::with_corpus(corpus);
    h.characters
        .set_results("Batman", vec![fixtures::character("Batman", "63", "good")])
        .await;

    let page = h.search(SearchRequest::new("Batman")).await;
    assert_eq!(page.characters.len(), 1);
}

#[tokio::test]
async fn test_expired_cache_entry_served_from_store() {
    let h = TestHarness::with_ttls(
        Arc::new(StaticCorpus::default()),
        Duration::from_millis(20),
        Duration::from_secs(60),
    );
    h.characters
        .set_results("Hulk", vec![fixtures::character("Hulk", "98", "good")])
        .await;

    h.search(SearchRequest::new("Hulk")).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.search(SearchRequest::new("Hulk")).await;

    assert_eq!(h.characters.query_count().await, 1);
}
