// src/toolkit/config.rs
// =============================================================================
// Configuration of a toolkit instance.
//
// The config is fixed once the toolkit is built: CrawlToolkit keeps its own
// copy and only hands out shared references.
// =============================================================================

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// Default time budget for one scrape
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

const DEFAULT_MAX_REDIRECTS: usize = 10;
const DEFAULT_CONCURRENCY: usize = 8;

/// How scraped content is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Markdown, with links and emphasis kept
    #[default]
    Markdown,
    /// Plain text, Markdown syntax stripped
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolkitConfig {
    /// Budget for a single scrape, from request to extracted content
    pub timeout: Duration,
    pub user_agent: String,
    pub output_format: OutputFormat,
    pub max_redirects: usize,
    /// Upper bound on simultaneous scrapes in `scrape_many`
    pub concurrency: usize,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            output_format: OutputFormat::default(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl ToolkitConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    // Checked when a toolkit is built from this config
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(ScrapeError::invalid_input(
                "timeout",
                "timeout must be a positive duration",
            ));
        }
        if self.concurrency == 0 {
            return Err(ScrapeError::invalid_input(
                "concurrency",
                "concurrency must be at least 1",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::invalid_input("user_agent", "user agent is empty"));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
