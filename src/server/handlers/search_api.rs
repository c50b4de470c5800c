//! Unified search endpoint merging scraped and database results.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::AppState;
use super::helpers::{bad_request, internal_error};
use crate::models::{ProductHit, ScrapedProduct};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search keyword.
    pub q: Option<String>,
}

/// Envelope returned by the unified search.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedSearchResponse {
    pub query: String,
    pub scraped: Vec<ScrapedProduct>,
    pub database: Vec<ProductHit>,
    pub total_results: usize,
}

/// GET /api/search?q=milk
///
/// Runs the scrape fan-out and the database keyword query concurrently and
/// merges both result sets. Scrapers degrade to empty lists internally, so
/// the only failure mode left here is the database.
pub async fn unified_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let q = params.q.as_deref().unwrap_or("").trim().to_string();
    if q.is_empty() {
        return bad_request("Search query cannot be empty.").into_response();
    }

    let (scraped, database) = tokio::join!(
        state.aggregator.search_all_sources(&q),
        state.product_repo.search(&q),
    );

    let database = match database {
        Ok(rows) => rows,
        Err(e) => return internal_error(e).into_response(),
    };

    let total_results = scraped.len() + database.len();

    Json(UnifiedSearchResponse {
        query: q,
        scraped,
        database,
        total_results,
    })
    .into_response()
}
