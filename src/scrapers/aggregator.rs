//! Fan-out/fan-in across all registered source adapters.

use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use super::http_client::HttpClient;
use super::NaheedScraper;
use super::{SourceAdapter, SourceOutcome};
use crate::models::ScrapedProduct;

/// Runs every registered adapter concurrently for the same keyword and
/// concatenates their results in registration order.
///
/// The join waits for all adapters (no short-circuit, no cross-adapter
/// cancellation); each adapter bounds its own latency. Because
/// concatenation follows registration order rather than completion order,
/// output ordering is deterministic for equal inputs.
#[derive(Clone)]
pub struct ScrapeAggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
}

impl ScrapeAggregator {
    /// Build an aggregator over the given adapters. Order is significant:
    /// it fixes the concatenation order of results.
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { adapters }
    }

    /// The production registry: Naheed first, then Daraz.
    pub fn with_default_sources() -> Self {
        let http = HttpClient::new();

        #[allow(unused_mut)]
        let mut adapters: Vec<Arc<dyn SourceAdapter>> =
            vec![Arc::new(NaheedScraper::new(http))];

        #[cfg(feature = "browser")]
        adapters.push(Arc::new(super::DarazScraper::new()));

        Self::new(adapters)
    }

    /// Registered adapter names, in registration order.
    pub fn source_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Run all adapters concurrently; per-adapter outcomes in registration
    /// order.
    pub async fn outcomes(&self, keyword: &str) -> Vec<(String, SourceOutcome)> {
        let searches = self.adapters.iter().map(|a| a.search(keyword));
        let outcomes = join_all(searches).await;

        self.adapters
            .iter()
            .map(|a| a.name().to_string())
            .zip(outcomes)
            .collect()
    }

    /// Every item from every source, concatenated in registration order.
    /// Failed or empty sources contribute nothing; this never fails.
    pub async fn search_all_sources(&self, keyword: &str) -> Vec<ScrapedProduct> {
        let mut all = Vec::new();

        for (source, outcome) in self.outcomes(keyword).await {
            let items = outcome.into_items();
            debug!("{} contributed {} items", source, items.len());
            all.extend(items);
        }

        all
    }
}
