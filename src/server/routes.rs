//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Unified search: scraped sites merged with the local database
        .route("/api/search", get(handlers::unified_search))
        // Scrape-only endpoints
        .route("/api/scraper/search", get(handlers::scrape_search))
        .route("/api/scraper/sources", get(handlers::list_sources))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
