// src/toolkit/mod.rs
// =============================================================================
// The toolkit wrapper: a configured object with one job, scraping a URL.
//
// Submodules:
// - config: timeout and the other settings fixed at construction
// - scrape: CrawlToolkit and its scrape operations
// =============================================================================

mod config;
mod scrape;

pub use config::{OutputFormat, ToolkitConfig, DEFAULT_TIMEOUT};
pub use scrape::{CrawlToolkit, RenderedPage};
