//! Shared HTTP client for the lightweight (non-browser) scrapers.

mod user_agent;

pub use user_agent::{UserAgentPool, USER_AGENTS};

use std::time::Duration;

use reqwest::Client;

use super::ScrapeError;

/// Hard timeout applied to every scraping request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pooled HTTP client. Cheap to clone; connections are reused across calls.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// GET a page as text with the given User-Agent header.
    /// Non-2xx statuses are reported as errors; callers do not retry.
    pub async fn get_text(&self, url: &str, user_agent: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScrapeError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
