//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external source traits
//! plus a cache store and a result store that fail, allowing the search
//! pipeline to be tested end to end without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use hunter_core::testing::{fixtures, MockCharacterSource, MockMediaSource};
//!
//! let characters = MockCharacterSource::new();
//! let media = MockMediaSource::new();
//!
//! // Configure mock responses
//! characters.set_results("Batman", vec![fixtures::character("Batman", "63", "good")]).await;
//! media.set_results("Batman", vec![fixtures::media("Batman Begins", "2005")]).await;
//!
//! // Use in a SearchOrchestrator...
//! ```

mod failing_cache;
mod failing_store;
mod mock_sources;

pub use failing_cache::FailingCacheStore;
pub use failing_store::FailingResultStore;
pub use mock_sources::{MockCharacterSource, MockMediaSource};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::search::{CharacterRecord, MediaRecord, ResultSet};

    /// Create a test character with a derived image URL.
    pub fn character(name: &str, power: &str, alignment: &str) -> CharacterRecord {
        CharacterRecord {
            name: name.to_string(),
            image: format!(
                "https://images.example/{}.jpg",
                name.to_lowercase().replace(' ', "-")
            ),
            power: power.to_string(),
            alignment: alignment.to_string(),
        }
    }

    /// Create a test movie or series.
    pub fn media(title: &str, year: &str) -> MediaRecord {
        MediaRecord {
            title: title.to_string(),
            poster: format!(
                "https://posters.example/{}.jpg",
                title.to_lowercase().replace(' ', "-")
            ),
            year: year.to_string(),
        }
    }

    /// Create a result set with `characters` good-aligned heroes and
    /// `media` titles, all named after `query`.
    pub fn result_set(query: &str, characters: usize, media: usize) -> ResultSet {
        ResultSet::new(
            query,
            (1..=characters)
                .map(|i| character(&format!("{} {}", query, i), &(i * 10).to_string(), "good"))
                .collect(),
            (1..=media)
                .map(|i| self::media(&format!("{} Movie {}", query, i), &(2000 + i).to_string()))
                .collect(),
        )
    }
}
