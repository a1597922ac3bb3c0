//! Search pipeline: tiered lookup, nearest-name fallback, filtering and
//! pagination over characters and media.

mod filter;
mod fuzzy;
mod orchestrator;
mod paginate;
mod types;

pub use filter::CharacterFilter;
pub use fuzzy::{edit_distance, nearest};
pub use orchestrator::SearchOrchestrator;
pub use paginate::{paginate, total_pages};
pub use types::{CharacterRecord, MediaRecord, Page, ResultSet, SearchRequest};

use thiserror::Error;

use crate::corpus::CorpusError;

/// Page size used when a request does not give a valid one.
pub const DEFAULT_PAGE_LIMIT: usize = 12;

/// Errors that fail a search outright.
///
/// Cache, store and source failures never surface here; they degrade to
/// misses or empty results.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("Name corpus unavailable: {0}")]
    Corpus(#[from] CorpusError),
}
