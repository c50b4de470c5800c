//! Web server exposing the unified search API.

mod handlers;
mod routes;

pub use handlers::UnifiedSearchResponse;
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::repository::{AsyncSqlitePool, DieselProductRepository};
use crate::scrapers::ScrapeAggregator;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<ScrapeAggregator>,
    pub product_repo: Arc<DieselProductRepository>,
}

impl AppState {
    /// State with the production scraper registry and the configured
    /// database.
    pub fn new(settings: &Settings) -> Self {
        let pool = AsyncSqlitePool::new(&settings.database_url);

        Self {
            aggregator: Arc::new(ScrapeAggregator::with_default_sources()),
            product_repo: Arc::new(DieselProductRepository::new(pool)),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::new(settings);
    state.product_repo.init_schema().await?;

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
