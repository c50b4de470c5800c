//! HTTP request handlers for the web server.

mod api;
mod helpers;
mod scrape_api;
mod search_api;

// Re-export handlers for use by the router
pub use api::health;
pub use scrape_api::{list_sources, scrape_search};
pub use search_api::{unified_search, UnifiedSearchResponse};
