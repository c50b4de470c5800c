//! Naheed scraper - lightweight HTTP + HTML-parse strategy.
//!
//! Naheed serves its catalog search as static HTML, so a plain GET and a
//! CSS-selector pass are enough. No browser involved.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::http_client::{HttpClient, UserAgentPool};
use super::{ScrapeError, SourceAdapter, SourceOutcome};
use crate::models::ScrapedProduct;

/// Naheed's catalog search endpoint; the encoded keyword is appended.
const SEARCH_URL: &str = "https://www.naheed.pk/catalogsearch/result/?q=";

pub const SOURCE_NAME: &str = "Naheed";

/// Adapter for naheed.pk.
pub struct NaheedScraper {
    http: HttpClient,
    agents: UserAgentPool,
    search_url: String,
}

impl NaheedScraper {
    /// Create an adapter sharing the given HTTP client.
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            agents: UserAgentPool::new(),
            search_url: SEARCH_URL.to_string(),
        }
    }

    /// Point the adapter at a different search endpoint (tests).
    pub fn with_search_url(mut self, search_url: &str) -> Self {
        self.search_url = search_url.to_string();
        self
    }

    async fn fetch(&self, keyword: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
        let url = format!("{}{}", self.search_url, urlencoding::encode(keyword));
        debug!("Naheed search: {}", url);

        let html = self.http.get_text(&url, self.agents.pick()).await?;
        parse_results(&html)
    }
}

/// Extract the product grid from a search results page.
///
/// Containers missing a name or price are skipped; a missing link or image
/// just leaves that field empty. Entity references in names are decoded by
/// the HTML parser.
fn parse_results(html: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
    let document = Html::parse_document(html);

    let container_sel = selector("li.product-item")?;
    let name_sel = selector("a.product-item-link")?;
    let price_sel = selector(r#"span[data-price-type="finalPrice"] span.price"#)?;
    let image_sel = selector("img.product-image-photo")?;

    let mut results = Vec::new();

    for node in document.select(&container_sel) {
        let link_el = node.select(&name_sel).next();

        let name = link_el
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let price = node
            .select(&price_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        // Grid slots without both are ads or broken markup.
        if name.is_empty() || price.is_empty() {
            continue;
        }

        let link = link_el
            .and_then(|el| el.value().attr("href"))
            .unwrap_or_default()
            .to_string();
        let image = node
            .select(&image_sel)
            .next()
            .and_then(|el| el.value().attr("src"))
            .unwrap_or_default()
            .to_string();

        results.push(ScrapedProduct {
            name,
            price,
            link,
            image,
            source: SOURCE_NAME.to_string(),
        });
    }

    debug!("Parsed {} products from Naheed", results.len());
    Ok(results)
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}

#[async_trait]
impl SourceAdapter for NaheedScraper {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn search(&self, keyword: &str) -> SourceOutcome {
        match self.fetch(keyword).await {
            Ok(items) => SourceOutcome::from_items(items),
            Err(e) => {
                warn!("Naheed search failed: {}", e);
                SourceOutcome::Failed(e)
            }
        }
    }
}
