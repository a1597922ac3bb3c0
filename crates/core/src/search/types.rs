//! Types for the search pipeline.

use serde::{Deserialize, Serialize};

use super::filter::CharacterFilter;

/// A character returned by the character source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterRecord {
    /// Display name (non-empty).
    pub name: String,
    /// Image URL (may be empty).
    #[serde(default)]
    pub image: String,
    /// Power stat as reported upstream; usually an integer, sometimes "null".
    #[serde(default)]
    pub power: String,
    /// Alignment ("good", "bad", "neutral", ...). Used as the filter category.
    #[serde(default)]
    pub alignment: String,
}

impl CharacterRecord {
    /// Power parsed as an integer, if it is one.
    pub fn power_value(&self) -> Option<i64> {
        self.power.trim().parse().ok()
    }
}

/// A movie or series returned by the media source.
///
/// Serialized with OMDb's capitalized keys, which is what clients read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct MediaRecord {
    pub title: String,
    #[serde(default)]
    pub poster: String,
    /// Display text only ("2008", "2011–2019", "").
    #[serde(default)]
    pub year: String,
}

/// The cached and persisted unit: everything known for one canonical query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSet {
    /// Canonical query; the key in both the cache and the durable store.
    pub query: String,
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
    #[serde(default)]
    pub media: Vec<MediaRecord>,
}

impl ResultSet {
    pub fn new(
        query: impl Into<String>,
        characters: Vec<CharacterRecord>,
        media: Vec<MediaRecord>,
    ) -> Self {
        Self {
            query: query.into(),
            characters,
            media,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.media.is_empty()
    }
}

/// One page of combined results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub characters: Vec<CharacterRecord>,
    pub media: Vec<MediaRecord>,
    pub total_pages: usize,
}

impl Page {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A search as received from a client, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// 1-based page number.
    pub page: usize,
    pub limit: usize,
    pub filter: CharacterFilter,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            limit: super::DEFAULT_PAGE_LIMIT,
            filter: CharacterFilter::default(),
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_filter(mut self, filter: CharacterFilter) -> Self {
        self.filter = filter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_value() {
        let mut hero = CharacterRecord {
            name: "Batman".to_string(),
            image: String::new(),
            power: "47".to_string(),
            alignment: "good".to_string(),
        };
        assert_eq!(hero.power_value(), Some(47));

        hero.power = " 100 ".to_string();
        assert_eq!(hero.power_value(), Some(100));

        hero.power = "null".to_string();
        assert_eq!(hero.power_value(), None);

        hero.power = String::new();
        assert_eq!(hero.power_value(), None);
    }

    #[test]
    fn test_page_wire_keys() {
        let page = Page {
            characters: vec![],
            media: vec![MediaRecord {
                title: "The Dark Knight".to_string(),
                poster: "https://img/dk.jpg".to_string(),
                year: "2008".to_string(),
            }],
            total_pages: 1,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["characters"].as_array().unwrap().len(), 0);
        assert_eq!(json["media"][0]["Title"], "The Dark Knight");
        assert_eq!(json["media"][0]["Poster"], "https://img/dk.jpg");
        assert_eq!(json["media"][0]["Year"], "2008");
        assert!(json["media"][0].get("title").is_none());
    }

    #[test]
    fn test_media_record_reads_capitalized_keys() {
        let parsed: MediaRecord =
            serde_json::from_str(r#"{"Title": "Batman", "Year": "1989"}"#).unwrap();
        assert_eq!(parsed.title, "Batman");
        assert_eq!(parsed.year, "1989");
        assert!(parsed.poster.is_empty());
    }

    #[test]
    fn test_result_set_tolerates_missing_collections() {
        let parsed: ResultSet = serde_json::from_str(r#"{"query": "batman"}"#).unwrap();
        assert_eq!(parsed.query, "batman");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("batman");
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 12);
        assert!(request.filter.is_noop());
    }
}
