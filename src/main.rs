// src/main.rs
// =============================================================================
// This is the entry point of the crawl-toolkit CLI.
//
// What happens here:
// 1. Install logging (RUST_LOG, to stderr so stdout only carries content)
// 2. Parse command-line arguments using clap
// 3. Build a toolkit and scrape every URL
// 4. Print the content (or JSON) and exit with a proper code
//    (0 = all scraped, 1 = some failed, 2 = error)
// =============================================================================

mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use crawl_toolkit::{CrawlToolkit, PageLinks, RenderedPage, ScrapeError, ToolkitConfig};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = every page scraped
//   Ok(1) = at least one page failed
//   Err   = the toolkit could not be set up
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            urls,
            timeout,
            format,
            json,
            concurrency,
            user_agent,
        } => {
            let mut config = ToolkitConfig::new(Duration::from_secs(timeout))
                .with_output_format(format)
                .with_concurrency(concurrency);
            if let Some(user_agent) = user_agent {
                config = config.with_user_agent(user_agent);
            }

            let toolkit = CrawlToolkit::with_config(config)?;
            handle_scrape(&toolkit, urls, json).await
        }
    }
}

// One line of JSON output per scraped URL
#[derive(Debug, Serialize)]
struct ScrapeReport {
    url: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<PageLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ScrapeReport {
    fn new(url: String, result: Result<RenderedPage, ScrapeError>) -> Self {
        match result {
            Ok(RenderedPage { page, content }) => Self {
                url,
                ok: true,
                content: Some(content),
                final_url: Some(page.final_url),
                title: page.title,
                links: Some(page.links),
                error: None,
            },
            Err(e) => Self {
                url,
                ok: false,
                final_url: None,
                title: None,
                content: None,
                links: None,
                error: Some(e.to_string()),
            },
        }
    }
}

async fn handle_scrape(toolkit: &CrawlToolkit, urls: Vec<String>, json: bool) -> Result<i32> {
    let reports = scrape_reports(toolkit, urls).await;
    print_reports(&reports, json)?;
    Ok(exit_code(&reports))
}

// One report per URL, in the order the URLs were given
async fn scrape_reports(toolkit: &CrawlToolkit, urls: Vec<String>) -> Vec<ScrapeReport> {
    let mut results = toolkit.scrape_many(urls.clone()).await;

    // Completion order is arbitrary
    results.sort_by_key(|(url, _)| urls.iter().position(|u| u == url));

    results
        .into_iter()
        .map(|(url, result)| ScrapeReport::new(url, result))
        .collect()
}

fn exit_code(reports: &[ScrapeReport]) -> i32 {
    if reports.iter().any(|r| !r.ok) {
        1
    } else {
        0
    }
}

fn print_reports(reports: &[ScrapeReport], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(reports)?;
        println!("{}", json_output);
        return Ok(());
    }

    let single = reports.len() == 1;
    for report in reports {
        match (&report.content, &report.error) {
            (Some(content), _) => {
                if !single {
                    println!("<!-- {} -->", report.url);
                }
                println!("{}", content);
                if !single {
                    println!();
                }
            }
            (None, Some(error)) => eprintln!("❌ {}", error),
            (None, None) => {}
        }
    }

    if !single {
        let ok_count = reports.iter().filter(|r| r.ok).count();
        eprintln!("📊 Summary:");
        eprintln!("   ✅ Scraped: {}", ok_count);
        eprintln!("   ❌ Failed: {}", reports.len() - ok_count);
        eprintln!("   📋 Total: {}", reports.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crawl_toolkit::{Crawler, FetchError, ScrapedPage};
    use std::sync::Arc;
    use url::Url;

    // Fails on /down; other paths answer after a delay taken from the query,
    // so completion order differs from input order
    struct MixedCrawler;

    #[async_trait]
    impl Crawler for MixedCrawler {
        async fn crawl(&self, url: &Url, _timeout: Duration) -> Result<ScrapedPage, FetchError> {
            if url.path() == "/down" {
                return Err(FetchError::Status(503));
            }
            let delay = url.query().and_then(|q| q.parse().ok()).unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(ScrapedPage::from_text(url, url, 200, url.path()))
        }
    }

    fn toolkit() -> CrawlToolkit {
        let config = ToolkitConfig::new(Duration::from_secs(5)).with_concurrency(4);
        CrawlToolkit::with_crawler(config, Arc::new(MixedCrawler)).unwrap()
    }

    #[tokio::test]
    async fn test_reports_keep_input_order() {
        let urls = vec![
            "https://example.org/b?150".to_string(),
            "https://example.org/down".to_string(),
            "not a url".to_string(),
            "https://example.org/a".to_string(),
        ];

        let reports = scrape_reports(&toolkit(), urls.clone()).await;

        let order: Vec<&str> = reports.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(order, urls.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(
            reports.iter().map(|r| r.ok).collect::<Vec<_>>(),
            vec![true, false, false, true]
        );
        assert_eq!(reports[0].content.as_deref(), Some("/b"));
        assert_eq!(exit_code(&reports), 1);
    }

    #[tokio::test]
    async fn test_all_scraped_exits_zero() {
        let urls = vec![
            "https://example.org/one?50".to_string(),
            "https://example.org/two".to_string(),
        ];

        let reports = scrape_reports(&toolkit(), urls).await;

        assert!(reports.iter().all(|r| r.ok));
        assert_eq!(exit_code(&reports), 0);
        assert_eq!(handle_scrape(&toolkit(), vec![], true).await.unwrap(), 0);
    }

    #[test]
    fn test_report_from_failure() {
        let error = ScrapeError::Fetch {
            url: "https://example.org/".to_string(),
            source: FetchError::Status(500),
        };
        let report = ScrapeReport::new("https://example.org/".to_string(), Err(error));

        assert!(!report.ok);
        assert_eq!(
            report.error.as_deref(),
            Some("failed to scrape https://example.org/: HTTP 500")
        );
        assert_eq!(exit_code(&[report]), 1);
    }

    #[test]
    fn test_report_json_skips_missing_fields() {
        let error = ScrapeError::Fetch {
            url: "https://example.org/".to_string(),
            source: FetchError::EmptyContent,
        };
        let report = ScrapeReport::new("https://example.org/".to_string(), Err(error));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["ok"], false);
    }
}
