//! Retail-site scrapers and the fan-out aggregator.
//!
//! Each supported site gets one adapter implementing [`SourceAdapter`].
//! Adapters own their fetch strategy end to end: the lightweight ones parse
//! static HTML over plain HTTP, the browser-driven ones render the page in
//! headless Chromium first. All of them normalize into
//! [`crate::models::ScrapedProduct`] and never propagate errors.

mod aggregator;
#[cfg(feature = "browser")]
pub mod browser;
#[cfg(feature = "browser")]
mod daraz;
pub mod http_client;
mod naheed;

pub use aggregator::ScrapeAggregator;
#[cfg(feature = "browser")]
pub use daraz::DarazScraper;
pub use naheed::NaheedScraper;

use async_trait::async_trait;

use crate::models::ScrapedProduct;

/// Errors that can occur while fetching or parsing a retail site.
///
/// These never cross the adapter boundary as errors; they are carried in
/// [`SourceOutcome::Failed`] so the aggregate search keeps going.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("selector failed: {0}")]
    Selector(String),

    #[error("browser error: {0}")]
    Browser(String),

    #[error("timed out waiting for {0}")]
    Timeout(String),
}

#[cfg(feature = "browser")]
impl From<chromiumoxide::error::CdpError> for ScrapeError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        ScrapeError::Browser(e.to_string())
    }
}

/// Result of one adapter invocation.
///
/// Keeps the no-throw contract while letting logs and tests distinguish
/// "the site had no matches" from "the fetch failed".
#[derive(Debug)]
pub enum SourceOutcome {
    /// At least one product was extracted.
    Hits(Vec<ScrapedProduct>),
    /// The fetch and parse succeeded but nothing matched.
    NoMatches,
    /// The fetch failed; the aggregate treats this as an empty list.
    Failed(ScrapeError),
}

impl SourceOutcome {
    /// Classify an extracted item list.
    pub fn from_items(items: Vec<ScrapedProduct>) -> Self {
        if items.is_empty() {
            SourceOutcome::NoMatches
        } else {
            SourceOutcome::Hits(items)
        }
    }

    /// Degrade to a plain item list; failures contribute nothing.
    pub fn into_items(self) -> Vec<ScrapedProduct> {
        match self {
            SourceOutcome::Hits(items) => items,
            SourceOutcome::NoMatches | SourceOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed(_))
    }
}

/// One site-specific fetch+parse strategy behind a uniform contract.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Site name stamped into the `source` field of produced items.
    fn name(&self) -> &str;

    /// Search the site for a keyword. Must not panic or return an error;
    /// failures become part of the outcome.
    async fn search(&self, keyword: &str) -> SourceOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ScrapedProduct {
        ScrapedProduct {
            name: name.to_string(),
            price: "Rs 100".to_string(),
            link: String::new(),
            image: String::new(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn empty_item_list_classifies_as_no_matches() {
        let outcome = SourceOutcome::from_items(Vec::new());
        assert!(matches!(outcome, SourceOutcome::NoMatches));
        assert!(outcome.into_items().is_empty());
    }

    #[test]
    fn failed_outcome_degrades_to_empty_list() {
        let outcome = SourceOutcome::Failed(ScrapeError::Selector("div.gone".to_string()));
        assert!(outcome.is_failed());
        assert!(outcome.into_items().is_empty());
    }

    #[test]
    fn hits_pass_through() {
        let outcome = SourceOutcome::from_items(vec![item("a"), item("b")]);
        assert_eq!(outcome.into_items().len(), 2);
    }
}
