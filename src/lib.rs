//! Scrape web pages into Markdown or plain text.
//!
//! [`CrawlToolkit`] is a thin wrapper around a [`Crawler`]: it validates the
//! URL, forwards it to the crawler under a fixed timeout and hands back the
//! extracted content. The default crawler, [`HttpCrawler`], fetches the page
//! over HTTP and converts the HTML to Markdown.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use crawl_toolkit::CrawlToolkit;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), crawl_toolkit::ScrapeError> {
//!     let toolkit = CrawlToolkit::new(Duration::from_secs(600))?;
//!     let content = toolkit.scrape("https://example.org/").await?;
//!     println!("{}", content);
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! A scrape either returns non-empty content or fails with
//! [`ScrapeError::InvalidInput`] (bad URL, nothing fetched) or
//! [`ScrapeError::Fetch`] (the crawler failed or ran out of time).

pub mod crawler;
pub mod error;
pub mod extract;
pub mod toolkit;

pub use crate::crawler::{Crawler, HttpCrawler, ScrapedPage};
pub use crate::error::{FetchError, ScrapeError};
pub use crate::extract::{html_to_markdown, markdown_to_text, PageLinks};
pub use crate::toolkit::{CrawlToolkit, OutputFormat, RenderedPage, ToolkitConfig, DEFAULT_TIMEOUT};
