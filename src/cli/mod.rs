//! Command-line interface for the `bazaar` binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::repository::{AsyncSqlitePool, DieselProductRepository, ProductRecord, StoreRecord};
use crate::scrapers::{ScrapeAggregator, SourceOutcome};

#[derive(Parser)]
#[command(name = "bazaar", version, about = "Marketplace unified search")]
struct Cli {
    /// Path to a TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init,

    /// Start the web server
    Serve {
        /// Bind address
        #[arg(long, env = "BAZAAR_HOST")]
        host: Option<String>,

        /// Bind port
        #[arg(long, env = "BAZAAR_PORT")]
        port: Option<u16>,
    },

    /// Scrape all retail sources for a keyword and print the results
    Search {
        /// Keyword to search for
        keyword: String,

        /// Also search the local product database
        #[arg(long)]
        db: bool,
    },

    /// Insert demo stores and products for local testing
    Seed,
}

/// Parse arguments and dispatch.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing::debug!("verbose logging enabled");
    }
    let mut settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Init => {
            product_repo(&settings).init_schema().await?;
            println!("Database ready at {}", settings.database_url);
            Ok(())
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                settings.host = host;
            }
            if let Some(port) = port {
                settings.port = port;
            }
            crate::server::serve(&settings).await
        }
        Commands::Search { keyword, db } => run_search(&settings, &keyword, db).await,
        Commands::Seed => run_seed(&settings).await,
    }
}

fn product_repo(settings: &Settings) -> DieselProductRepository {
    DieselProductRepository::new(AsyncSqlitePool::new(&settings.database_url))
}

async fn run_search(settings: &Settings, keyword: &str, include_db: bool) -> anyhow::Result<()> {
    let keyword = keyword.trim();
    anyhow::ensure!(!keyword.is_empty(), "search keyword cannot be empty");

    let aggregator = ScrapeAggregator::with_default_sources();

    for (source, outcome) in aggregator.outcomes(keyword).await {
        match outcome {
            SourceOutcome::Hits(items) => {
                println!("{}: {} results", source, items.len());
                for item in items {
                    println!("  {} - {} [{}]", item.name, item.price, item.link);
                }
            }
            SourceOutcome::NoMatches => println!("{}: no matches", source),
            SourceOutcome::Failed(e) => println!("{}: fetch failed ({})", source, e),
        }
    }

    if include_db {
        let hits = product_repo(settings)
            .search(keyword)
            .await
            .context("database search failed")?;
        println!("database: {} results", hits.len());
        for hit in hits {
            println!("  {} - Rs {} @ {}", hit.name, hit.price, hit.store);
        }
    }

    Ok(())
}

async fn run_seed(settings: &Settings) -> anyhow::Result<()> {
    let repo = product_repo(settings);
    repo.init_schema().await?;

    repo.save_store(&StoreRecord::new(
        1,
        "Karachi Corner Mart",
        "12 Canal Road, Karachi",
        "0300-1234567",
    ))
    .await?;
    repo.save_store(&StoreRecord::new(
        2,
        "Lahore Fresh Foods",
        "88 Mall Road, Lahore",
        "0321-7654321",
    ))
    .await?;

    let products = [
        ProductRecord::new(1, 1, "Fresh Milk 1L", 240.0)
            .with_description("Full cream dairy milk")
            .with_category("dairy")
            .with_stock(40),
        ProductRecord::new(2, 1, "Brown Bread", 180.0)
            .with_description("Whole wheat loaf")
            .with_category("bakery")
            .with_stock(25),
        ProductRecord::new(3, 2, "Basmati Rice 5kg", 1850.0)
            .with_description("Long grain basmati")
            .with_category("grocery")
            .with_stock(12),
        ProductRecord::new(4, 2, "Milk Powder 900g", 1450.0)
            .with_description("Instant full cream powder")
            .with_category("dairy")
            .with_stock(18),
    ];
    for product in &products {
        repo.save_product(product).await?;
    }

    println!(
        "Seeded 2 stores and {} products into {}",
        products.len(),
        settings.database_url
    );
    Ok(())
}
