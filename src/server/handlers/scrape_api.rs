//! Scrape-only endpoints, bypassing the database.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use super::super::AppState;
use super::helpers::bad_request;
use super::search_api::SearchParams;

/// GET /api/scraper/search?q=milk
///
/// The aggregated scrape list alone; useful for probing the adapters.
pub async fn scrape_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let q = params.q.as_deref().unwrap_or("").trim();
    if q.is_empty() {
        return bad_request("Search query cannot be empty.").into_response();
    }

    Json(state.aggregator.search_all_sources(q).await).into_response()
}

#[derive(Debug, Serialize)]
pub struct SourceList {
    pub sources: Vec<String>,
}

/// GET /api/scraper/sources
pub async fn list_sources(State(state): State<AppState>) -> impl IntoResponse {
    Json(SourceList {
        sources: state
            .aggregator
            .source_names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
