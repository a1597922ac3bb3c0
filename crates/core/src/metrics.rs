//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Search pipeline (which tier answered, fuzzy resolutions, alias hits)
//! - External sources (errors, call latency)
//! - Cache and store writes that were dropped

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Search Pipeline Metrics
// =============================================================================

/// Searches answered, by the tier that produced the result.
pub static SEARCH_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("hunter_search_requests_total", "Total searches by answering tier"),
        &["tier"], // "cache", "store", "fetch", "empty"
    )
    .unwrap()
});

/// End-to-end search duration in seconds.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "hunter_search_duration_seconds",
            "Duration of a search through the pipeline",
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["tier"],
    )
    .unwrap()
});

/// Queries rewritten by nearest-name resolution.
pub static FUZZY_RESOLUTIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "hunter_fuzzy_resolutions_total",
        "Queries resolved to a different name by nearest-name matching",
    )
    .unwrap()
});

/// Queries rewritten by a cached alias.
pub static ALIAS_HITS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("hunter_alias_hits_total", "Queries rewritten by a cached alias").unwrap()
});

// =============================================================================
// External Source Metrics
// =============================================================================

/// External source failures, absorbed as empty results.
pub static SOURCE_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("hunter_source_errors_total", "Total external source failures"),
        &["source"],
    )
    .unwrap()
});

/// External source call duration.
pub static SOURCE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "hunter_source_duration_seconds",
            "Duration of external source calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["source"],
    )
    .unwrap()
});

// =============================================================================
// Persistence Metrics
// =============================================================================

/// Dropped writes to the cache or durable store.
pub static PERSIST_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "hunter_persist_failures_total",
            "Total failed cache or store writes",
        ),
        &["target"], // "cache", "store", "alias"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Search pipeline
        Box::new(SEARCH_REQUESTS.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(FUZZY_RESOLUTIONS.clone()),
        Box::new(ALIAS_HITS.clone()),
        // External sources
        Box::new(SOURCE_ERRORS.clone()),
        Box::new(SOURCE_DURATION.clone()),
        // Persistence
        Box::new(PERSIST_FAILURES.clone()),
    ]
}
