// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is declared as Rust structs and
// enums, and clap generates the parsing, --help and --version for us.
// =============================================================================

use clap::{Parser, Subcommand};
use crawl_toolkit::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "crawl-toolkit",
    version,
    about = "Scrape web pages into Markdown or plain text",
    long_about = "crawl-toolkit fetches web pages and extracts their readable content as \
                  Markdown (or plain text). Each URL is scraped independently under a fixed timeout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape one or more pages and print their content
    ///
    /// Example: crawl-toolkit scrape https://example.org --format text
    Scrape {
        /// URLs to scrape (http or https)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Timeout for each page, in seconds
        #[arg(long, env = "CRAWL_TOOLKIT_TIMEOUT", default_value_t = 600)]
        timeout: u64,

        /// Output format of the page content
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        /// Output results in JSON format instead of plain content
        #[arg(long)]
        json: bool,

        /// How many pages to scrape at the same time
        #[arg(long, default_value_t = 8)]
        concurrency: usize,

        /// User-Agent header sent with each request
        #[arg(long)]
        user_agent: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scrape_defaults() {
        let cli = Cli::try_parse_from(["crawl-toolkit", "scrape", "https://example.org"]).unwrap();
        let Commands::Scrape {
            urls,
            format,
            json,
            concurrency,
            user_agent,
            ..
        } = cli.command;

        assert_eq!(urls, vec!["https://example.org"]);
        assert_eq!(format, OutputFormat::Markdown);
        assert!(!json);
        assert_eq!(concurrency, 8);
        assert_eq!(user_agent, None);
    }

    #[test]
    fn test_parse_scrape_flags() {
        let cli = Cli::try_parse_from([
            "crawl-toolkit",
            "scrape",
            "https://a.example",
            "https://b.example",
            "--timeout",
            "30",
            "--format",
            "text",
            "--json",
        ])
        .unwrap();
        let Commands::Scrape {
            urls,
            timeout,
            format,
            json,
            ..
        } = cli.command;

        assert_eq!(urls.len(), 2);
        assert_eq!(timeout, 30);
        assert_eq!(format, OutputFormat::Text);
        assert!(json);
    }

    #[test]
    fn test_scrape_requires_a_url() {
        assert!(Cli::try_parse_from(["crawl-toolkit", "scrape"]).is_err());
    }
}
