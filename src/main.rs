//! SmartBazaar - marketplace unified search backend.
//!
//! Entry point for the `bazaar` binary: serves the search API or runs
//! one-off scrapes from the command line.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if smartbazaar::cli::is_verbose() {
        "smartbazaar=debug"
    } else {
        "smartbazaar=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    smartbazaar::cli::run().await
}
