//! Daraz scraper - headless-browser strategy.
//!
//! Daraz renders its catalog grid client-side, so a plain GET returns an
//! empty shell. Each search launches an isolated Chromium, waits for the
//! grid to render, and extracts product cards element by element.

use async_trait::async_trait;
use chromiumoxide::Element;
use tracing::{debug, warn};

use super::browser::{BrowserSession, DOM_WAIT_TIMEOUT};
use super::http_client::UserAgentPool;
use super::{ScrapeError, SourceAdapter, SourceOutcome};
use crate::models::ScrapedProduct;

/// Daraz's catalog search endpoint; the encoded keyword is appended.
const SEARCH_URL: &str = "https://www.daraz.pk/catalog/?q=";

/// Product cards in the rendered result grid.
const ITEM_SELECTOR: &str = r#"div[data-qa-locator="product-item"]"#;

/// Upper bound on cards processed per search, to bound per-call DOM work.
const MAX_ITEMS: usize = 10;

pub const SOURCE_NAME: &str = "Daraz";

/// Adapter for daraz.pk.
pub struct DarazScraper {
    agents: UserAgentPool,
}

impl DarazScraper {
    pub fn new() -> Self {
        Self {
            agents: UserAgentPool::new(),
        }
    }

    async fn fetch(&self, keyword: &str) -> Result<Vec<ScrapedProduct>, ScrapeError> {
        let url = format!("{}{}", SEARCH_URL, urlencoding::encode(keyword));
        debug!("Daraz search: {}", url);

        let session = BrowserSession::launch(self.agents.pick()).await?;

        // All navigation and extraction runs behind the session so the
        // browser process is released on every path out of here.
        let result = scrape_page(&session, &url).await;
        session.close().await;
        result
    }
}

impl Default for DarazScraper {
    fn default() -> Self {
        Self::new()
    }
}

async fn scrape_page(
    session: &BrowserSession,
    url: &str,
) -> Result<Vec<ScrapedProduct>, ScrapeError> {
    let page = session.open(url).await?;
    session
        .wait_for_elements(&page, ITEM_SELECTOR, DOM_WAIT_TIMEOUT)
        .await?;

    let elements = page.find_elements(ITEM_SELECTOR).await?;
    let mut results = Vec::new();

    for element in elements.into_iter().take(MAX_ITEMS) {
        match extract_item(&element, url).await {
            Ok(item) => results.push(item),
            // One broken card must not abort the rest of the grid.
            Err(e) => {
                debug!("skipping Daraz card: {}", e);
                continue;
            }
        }
    }

    debug!("Extracted {} products from Daraz", results.len());
    Ok(results)
}

/// Pull one product out of a rendered card.
async fn extract_item(element: &Element, fallback_link: &str) -> Result<ScrapedProduct, ScrapeError> {
    let title = element.find_element("div.title--wFj93 > a").await?;
    let name = title.inner_text().await?.unwrap_or_default();
    let price = element
        .find_element("span.currency--GVKjl")
        .await?
        .inner_text()
        .await?
        .unwrap_or_default();

    if name.trim().is_empty() || price.trim().is_empty() {
        return Err(ScrapeError::Selector(
            "card missing name or price".to_string(),
        ));
    }

    let link = title
        .attribute("href")
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| fallback_link.to_string());
    let image = match element.find_element("img.mainPic--ehOdr").await {
        Ok(img) => img.attribute("src").await.ok().flatten().unwrap_or_default(),
        Err(_) => String::new(),
    };

    Ok(ScrapedProduct {
        name: name.trim().to_string(),
        price: format!("Rs. {}", price.trim()),
        link,
        image,
        source: SOURCE_NAME.to_string(),
    })
}

#[async_trait]
impl SourceAdapter for DarazScraper {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn search(&self, keyword: &str) -> SourceOutcome {
        match self.fetch(keyword).await {
            Ok(items) => SourceOutcome::from_items(items),
            Err(e) => {
                warn!("Daraz search failed: {}", e);
                SourceOutcome::Failed(e)
            }
        }
    }
}
