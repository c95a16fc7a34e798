// src/crawler/mod.rs
// =============================================================================
// This module holds the crawling capability the toolkit delegates to.
//
// The toolkit only knows the `Crawler` trait: give it a URL and a time
// budget, get a page back. How the page is fetched, rendered and extracted
// is up to the implementation.
//
// Submodules:
// - http: the default crawler, plain HTTP GET + HTML extraction
// - page: the ScrapedPage a crawl produces
// =============================================================================

mod http;
mod page;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpCrawler;
pub use page::ScrapedPage;

/// A capability that fetches a page and extracts its content.
///
/// Implementations must be shareable across tasks: the toolkit may run
/// several crawls on the same instance at once.
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Fetches `url` and returns the extracted page.
    ///
    /// `timeout` is the budget the toolkit grants this call; the toolkit
    /// also enforces it from the outside.
    async fn crawl(&self, url: &Url, timeout: Duration) -> Result<ScrapedPage, FetchError>;
}
