// src/crawler/page.rs
// =============================================================================
// The result of crawling one URL.
// =============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

use crate::extract::{extract_page, markdown_to_text, PageLinks};
use crate::toolkit::OutputFormat;

/// A crawled page: where it came from and what was extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// The URL that was requested
    pub url: String,
    /// The URL the content was served from, after redirects
    pub final_url: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page content as Markdown
    pub markdown: String,
    #[serde(default)]
    pub links: PageLinks,
}

impl ScrapedPage {
    // Builds a page from an HTML body; links resolve against the final URL
    pub fn from_html(url: &Url, final_url: &Url, status_code: u16, html: &str) -> Self {
        let extracted = extract_page(html, final_url);

        Self {
            url: url.to_string(),
            final_url: final_url.to_string(),
            status_code,
            title: extracted.title,
            markdown: extracted.markdown,
            links: extracted.links,
        }
    }

    // Builds a page from a non-HTML text body, kept as-is
    pub fn from_text(url: &Url, final_url: &Url, status_code: u16, text: &str) -> Self {
        Self {
            url: url.to_string(),
            final_url: final_url.to_string(),
            status_code,
            title: None,
            markdown: text.trim().to_string(),
            links: PageLinks::default(),
        }
    }

    /// Returns the page content in the requested format.
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Markdown => self.markdown.clone(),
            OutputFormat::Text => markdown_to_text(&self.markdown),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.markdown.trim().is_empty()
    }
}
