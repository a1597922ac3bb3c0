//! Search orchestrator.
//!
//! Answers a search from the first tier that has the query:
//! - Alias cache rewrites the query to a previously resolved name
//! - Result cache, then durable store, keyed by that name
//! - External sources, with nearest-name fallback when no character matches
//!
//! Everything fetched is written back to the cache and the store so the next
//! request for the same name stops at the first tier.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::SearchCache;
use crate::corpus::NameCorpus;
use crate::metrics;
use crate::sources::{CharacterSource, MediaSource};
use crate::store::ResultStore;

use super::filter::CharacterFilter;
use super::fuzzy::nearest;
use super::paginate::paginate;
use super::types::{CharacterRecord, MediaRecord, Page, ResultSet, SearchRequest};
use super::SearchError;

/// Tier that produced the result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Cache,
    Store,
    Fetch,
    Empty,
}

impl Tier {
    fn as_str(self) -> &'static str {
        match self {
            Tier::Cache => "cache",
            Tier::Store => "store",
            Tier::Fetch => "fetch",
            Tier::Empty => "empty",
        }
    }
}

/// Filtered collections for one search, before pagination.
struct Resolved {
    tier: Tier,
    characters: Vec<CharacterRecord>,
    media: Vec<MediaRecord>,
}

/// Runs searches through the cache, store and external sources.
///
/// Holds only shared handles; one instance serves all requests concurrently.
pub struct SearchOrchestrator {
    cache: SearchCache,
    store: Arc<dyn ResultStore>,
    characters: Arc<dyn CharacterSource>,
    media: Arc<dyn MediaSource>,
    corpus: Arc<dyn NameCorpus>,
}

impl SearchOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        cache: SearchCache,
        store: Arc<dyn ResultStore>,
        characters: Arc<dyn CharacterSource>,
        media: Arc<dyn MediaSource>,
        corpus: Arc<dyn NameCorpus>,
    ) -> Self {
        Self {
            cache,
            store,
            characters,
            media,
            corpus,
        }
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Run one search and return the requested page.
    pub async fn search(&self, request: &SearchRequest) -> Result<Page, SearchError> {
        let started = Instant::now();

        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let resolved = self.resolve(query, &request.filter).await?;

        let page = paginate(
            &resolved.characters,
            &resolved.media,
            request.page,
            request.limit,
        );

        let tier = resolved.tier.as_str();
        metrics::SEARCH_REQUESTS.with_label_values(&[tier]).inc();
        metrics::SEARCH_DURATION
            .with_label_values(&[tier])
            .observe(started.elapsed().as_secs_f64());

        debug!(
            "Search '{}' answered from {} (page {} of {})",
            query, tier, request.page, page.total_pages
        );
        Ok(page)
    }

    async fn resolve(
        &self,
        original: &str,
        filter: &CharacterFilter,
    ) -> Result<Resolved, SearchError> {
        let effective = self.resolve_alias(original).await;

        if let Some(set) = self.cached(&effective).await {
            info!("Cache hit for '{}'", effective);
            return Ok(Resolved {
                tier: Tier::Cache,
                characters: filter.apply(set.characters),
                media: set.media,
            });
        }

        if let Some(set) = self.stored(&effective) {
            info!("Store hit for '{}'", effective);
            self.cache_result_set(&set).await;
            return Ok(Resolved {
                tier: Tier::Store,
                characters: filter.apply(set.characters),
                media: set.media,
            });
        }

        let (canonical, characters, media) = self.fetch_with_fallback(effective).await?;
        let characters = filter.apply(characters);

        if characters.is_empty() && media.is_empty() {
            info!("No results for '{}'", original);
            return Ok(Resolved {
                tier: Tier::Empty,
                characters,
                media,
            });
        }

        let set = ResultSet::new(canonical, characters, media);
        self.cache_result_set(&set).await;
        self.store_result_set(&set);
        if set.query != original {
            self.remember_alias(original, &set.query).await;
        }

        Ok(Resolved {
            tier: Tier::Fetch,
            characters: set.characters,
            media: set.media,
        })
    }

    /// Canonical query for `original`: the cached alias if one exists.
    async fn resolve_alias(&self, original: &str) -> String {
        match self.cache.get_alias(original).await {
            Ok(Some(canonical)) => {
                info!("Alias hit: '{}' -> '{}'", original, canonical);
                metrics::ALIAS_HITS.inc();
                canonical
            }
            Ok(None) => original.to_string(),
            Err(e) => {
                warn!("Alias lookup for '{}' failed: {}", original, e);
                original.to_string()
            }
        }
    }

    async fn cached(&self, query: &str) -> Option<ResultSet> {
        match self.cache.get_result_set(query).await {
            Ok(set) => set,
            Err(e) => {
                warn!("Cache lookup for '{}' failed: {}", query, e);
                None
            }
        }
    }

    fn stored(&self, query: &str) -> Option<ResultSet> {
        match self.store.find(query) {
            Ok(set) => set,
            Err(e) => {
                warn!("Store lookup for '{}' failed: {}", query, e);
                None
            }
        }
    }

    /// Fetch both collections for `query`. When no character matches, retry
    /// with the nearest known name; the name actually fetched is returned.
    async fn fetch_with_fallback(
        &self,
        query: String,
    ) -> Result<(String, Vec<CharacterRecord>, Vec<MediaRecord>), SearchError> {
        let (characters, media) = self.fetch(&query).await;
        if !characters.is_empty() {
            return Ok((query, characters, media));
        }

        let names = self.corpus.load().await?;
        let Some(closest) = nearest(&query, names.as_slice()) else {
            debug!("Name corpus is empty, keeping '{}'", query);
            return Ok((query, characters, media));
        };
        if closest == query {
            return Ok((query, characters, media));
        }

        info!("Closest match for '{}': '{}'", query, closest);
        metrics::FUZZY_RESOLUTIONS.inc();

        let closest = closest.to_string();
        let (characters, media) = self.fetch(&closest).await;
        Ok((closest, characters, media))
    }

    /// Characters and media for `query`, fetched concurrently. A failing
    /// source contributes an empty collection.
    async fn fetch(&self, query: &str) -> (Vec<CharacterRecord>, Vec<MediaRecord>) {
        let (characters, media) = tokio::join!(
            timed(self.characters.name(), self.characters.fetch_characters(query)),
            timed(self.media.name(), self.media.fetch_media(query)),
        );

        let characters = characters.unwrap_or_else(|e| {
            warn!(
                "Character source '{}' failed for '{}': {}",
                self.characters.name(),
                query,
                e
            );
            metrics::SOURCE_ERRORS
                .with_label_values(&[self.characters.name()])
                .inc();
            Vec::new()
        });
        let media = media.unwrap_or_else(|e| {
            warn!(
                "Media source '{}' failed for '{}': {}",
                self.media.name(),
                query,
                e
            );
            metrics::SOURCE_ERRORS
                .with_label_values(&[self.media.name()])
                .inc();
            Vec::new()
        });

        debug!(
            "Fetched {} characters and {} media for '{}'",
            characters.len(),
            media.len(),
            query
        );
        (characters, media)
    }

    async fn cache_result_set(&self, set: &ResultSet) {
        if let Err(e) = self.cache.put_result_set(set).await {
            warn!("Failed to cache results for '{}': {}", set.query, e);
            metrics::PERSIST_FAILURES.with_label_values(&["cache"]).inc();
        }
    }

    fn store_result_set(&self, set: &ResultSet) {
        if let Err(e) = self.store.save(set) {
            warn!("Failed to store results for '{}': {}", set.query, e);
            metrics::PERSIST_FAILURES.with_label_values(&["store"]).inc();
        }
    }

    async fn remember_alias(&self, original: &str, canonical: &str) {
        if let Err(e) = self.cache.put_alias(original, canonical).await {
            warn!(
                "Failed to cache alias '{}' -> '{}': {}",
                original, canonical, e
            );
            metrics::PERSIST_FAILURES.with_label_values(&["alias"]).inc();
        }
    }
}

async fn timed<T>(source: &'static str, call: impl std::future::Future<Output = T>) -> T {
    let started = Instant::now();
    let result = call.await;
    metrics::SOURCE_DURATION
        .with_label_values(&[source])
        .observe(started.elapsed().as_secs_f64());
    result
}
