// src/toolkit/scrape.rs
// =============================================================================
// CrawlToolkit: the call surface callers use to scrape pages.
//
// Every scrape goes through the same steps:
// 1. Validate the URL (bad input never reaches the network)
// 2. Hand it to the crawler, bounded by the configured timeout
// 3. Refuse empty content instead of returning an empty string
//
// There is no retry and no cache: each call is one independent crawl.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use url::Url;

use super::config::ToolkitConfig;
use crate::crawler::{Crawler, HttpCrawler, ScrapedPage};
use crate::error::{FetchError, Result, ScrapeError};

/// Scrapes web pages through a [`Crawler`], applying a fixed timeout.
///
/// Building a toolkit does no network I/O. The toolkit is cheap to share:
/// concurrent calls on one instance are independent of each other.
#[derive(Clone)]
pub struct CrawlToolkit {
    config: ToolkitConfig,
    crawler: Arc<dyn Crawler>,
}

/// A scraped page and its content in the toolkit's output format.
///
/// `content` is never blank.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub page: ScrapedPage,
    pub content: String,
}

impl std::fmt::Debug for CrawlToolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlToolkit")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CrawlToolkit {
    /// Creates a toolkit with the default HTTP crawler and the given timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_config(ToolkitConfig::new(timeout))
    }

    pub fn with_config(config: ToolkitConfig) -> Result<Self> {
        config.validate()?;
        let crawler = HttpCrawler::new(&config)?;
        Ok(Self {
            config,
            crawler: Arc::new(crawler),
        })
    }

    /// Creates a toolkit that delegates to a custom crawler.
    pub fn with_crawler(config: ToolkitConfig, crawler: Arc<dyn Crawler>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, crawler })
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Scrapes `url` and returns its content in the configured format.
    ///
    /// The result is never empty: a page without extractable content is a
    /// [`FetchError::EmptyContent`] failure.
    pub async fn scrape(&self, url: &str) -> Result<String> {
        let rendered = self.scrape_rendered(url).await?;
        Ok(rendered.content)
    }

    /// Scrapes `url` and returns the page along with its rendered content.
    pub async fn scrape_rendered(&self, url: &str) -> Result<RenderedPage> {
        let page = self.scrape_page(url).await?;
        let content = page.render(self.config.output_format);

        // Markdown can have content that renders to nothing, e.g. a lone image
        if content.trim().is_empty() {
            warn!(url = %page.url, format = ?self.config.output_format, "rendered content is empty");
            return Err(ScrapeError::fetch(page.url, FetchError::EmptyContent));
        }

        Ok(RenderedPage { page, content })
    }

    /// Scrapes `url` and returns the whole page: title, Markdown and links.
    pub async fn scrape_page(&self, url: &str) -> Result<ScrapedPage> {
        let target = parse_target(url)?;
        let timeout = self.config.timeout;

        info!(url = %target, ?timeout, "scraping");

        let page = match tokio::time::timeout(timeout, self.crawler.crawl(&target, timeout)).await {
            Ok(Ok(page)) => page,
            Ok(Err(source)) => {
                warn!(url = %target, error = %source, "scrape failed");
                return Err(ScrapeError::fetch(target, source));
            }
            Err(_) => {
                warn!(url = %target, ?timeout, "scrape timed out");
                return Err(ScrapeError::fetch(target, FetchError::Timeout));
            }
        };

        if !page.has_content() {
            warn!(url = %target, "page has no extractable content");
            return Err(ScrapeError::fetch(target, FetchError::EmptyContent));
        }

        debug!(url = %target, bytes = page.markdown.len(), "scraped");
        Ok(page)
    }

    /// Scrapes several URLs at once, at most `concurrency` at a time.
    ///
    /// Each URL gets its own result; a failure never affects the others.
    /// Results come back in completion order, not input order.
    pub async fn scrape_many(&self, urls: Vec<String>) -> Vec<(String, Result<RenderedPage>)> {
        let futures = urls.into_iter().map(|url| async move {
            let result = self.scrape_rendered(&url).await;
            (url, result)
        });

        stream::iter(futures)
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await
    }
}

// Accepts absolute http(s) URLs with a host; anything else is invalid input
fn parse_target(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::invalid_input(input, "URL is empty"));
    }

    let url = Url::parse(trimmed).map_err(|e| ScrapeError::invalid_input(input, e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ScrapeError::invalid_input(
            input,
            format!("unsupported scheme `{}`, expected http or https", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ScrapeError::invalid_input(input, "URL has no host"));
    }

    Ok(url)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Arc<dyn Crawler>?
//    - The toolkit does not care how a page is fetched, only that it is
//    - Arc makes the toolkit cheap to clone and share between tasks
//    - Tests swap in crawlers that are slow, failing or counting calls
//
// 2. Why tokio::time::timeout on top of the HTTP timeout?
//    - A custom crawler may ignore the budget it is given
//    - Dropping the future on expiry cancels whatever it was doing
//
// 3. What does buffer_unordered(n) do?
//    - Polls up to n futures at once and yields results as they finish
//    - So scrape_many returns in completion order, not input order
// -----------------------------------------------------------------------------
