//! Search API handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use hunter_core::{CharacterFilter, Page, SearchError, SearchRequest};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Raw query string. Every field is text so malformed numbers can be
/// handled per field instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub power_min: Option<String>,
    #[serde(default)]
    pub power_max: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

impl SearchParams {
    /// Build a search request.
    ///
    /// `page` and `limit` fall back to their defaults when missing, malformed
    /// or below 1. Malformed power bounds are rejected.
    pub fn into_request(self, default_limit: usize) -> Result<SearchRequest, ApiError> {
        let page = positive_or(self.page.as_deref(), 1);
        let limit = positive_or(self.limit.as_deref(), default_limit);

        let power_min = parse_power(self.power_min.as_deref(), "powerMin")?;
        let power_max = parse_power(self.power_max.as_deref(), "powerMax")?;
        let filter = CharacterFilter::from_raw(
            power_min,
            power_max,
            self.category.as_deref().unwrap_or(""),
        );

        Ok(SearchRequest::new(self.query.unwrap_or_default())
            .with_page(page)
            .with_limit(limit)
            .with_filter(filter))
    }
}

fn positive_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Absent or empty means unset, reported as `0`.
fn parse_power(raw: Option<&str>, name: &str) -> Result<i64, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(v) => v
            .parse::<i64>()
            .map_err(|_| bad_request(format!("Invalid {} value: '{}'", name, v))),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/search
///
/// Search characters and media, one page at a time.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Page>, ApiError> {
    let request = params.into_request(state.config().search.default_limit)?;

    match state.orchestrator().search(&request).await {
        Ok(page) => Ok(Json(page)),
        Err(SearchError::EmptyQuery) => Err(bad_request("Query parameter 'query' is required")),
        Err(e @ SearchError::Corpus(_)) => {
            error!("Search for '{}' failed: {}", request.query, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error loading superhero names.".to_string(),
                }),
            ))
        }
    }
}
