// src/crawler/http.rs
// =============================================================================
// The default crawler: fetches pages over HTTP and extracts their content.
//
// Key functionality:
// - One reqwest Client per crawler, reused across calls (connection pooling)
// - Per-request timeout taken from the budget the toolkit grants
// - Bounded redirects
// - Non-2xx responses are failures, never scraped as content
// - HTML bodies go through the extractor; other text bodies are kept as-is
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{Crawler, ScrapedPage};
use crate::error::{FetchError, Result, ScrapeError};
use crate::toolkit::ToolkitConfig;

// Upper bound for establishing a connection, independent of the page budget
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Crawler backed by a plain HTTP GET.
///
/// It does not execute JavaScript: pages that build their content in the
/// browser come back with whatever the server sent.
#[derive(Debug, Clone)]
pub struct HttpCrawler {
    client: Client,
}

impl HttpCrawler {
    pub fn new(config: &ToolkitConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(config.max_redirects))
            .connect_timeout(config.timeout.min(CONNECT_TIMEOUT))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::Setup(e.to_string()))?;

        Ok(Self { client })
    }

    /// Uses an already configured client, e.g. one with a proxy.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Crawler for HttpCrawler {
    async fn crawl(&self, url: &Url, timeout: Duration) -> Result<ScrapedPage, FetchError> {
        debug!(%url, ?timeout, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "page returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let declared_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|content_type| content_type.contains("html"));

        let body = response.text().await?;
        let is_html = declared_html.unwrap_or_else(|| looks_like_html(&body));

        let page = if is_html {
            ScrapedPage::from_html(url, &final_url, status.as_u16(), &body)
        } else {
            ScrapedPage::from_text(url, &final_url, status.as_u16(), &body)
        };

        debug!(
            %url,
            %final_url,
            bytes = body.len(),
            html = is_html,
            links = page.links.len(),
            "page extracted"
        );

        Ok(page)
    }
}

// Sniffs bodies served without a Content-Type
fn looks_like_html(body: &str) -> bool {
    let start = body.trim_start();
    let prefix: String = start.chars().take(15).collect::<String>().to_lowercase();
    prefix.starts_with("<!doctype html") || prefix.starts_with("<html") || prefix.starts_with("<head")
}
