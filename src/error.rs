// src/error.rs
// =============================================================================
// Error types for the toolkit.
//
// A scrape fails in one of two ways:
// - InvalidInput: the URL (or the configuration) is unusable, detected
//   before anything touches the network
// - Fetch: the crawler could not deliver content in time; the cause is
//   kept as a FetchError so callers can tell a timeout from a 404
// =============================================================================

use std::error::Error as StdError;

use thiserror::Error;

/// Why the crawler could not produce a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The fetch did not complete within the configured timeout
    #[error("timed out")]
    Timeout,
    /// The server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),
    /// Redirect limit exceeded (or a redirect loop)
    #[error("too many redirects")]
    TooManyRedirects,
    /// The host name could not be resolved
    #[error("could not resolve host")]
    Dns,
    /// The connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),
    /// TLS handshake or certificate failure
    #[error("TLS error: {0}")]
    Tls(String),
    /// The page was fetched but no content could be extracted from it
    #[error("page has no extractable content")]
    EmptyContent,
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    // Sorts reqwest's error into the categories above.
    //
    // reqwest only exposes a few predicates, so DNS and TLS failures are
    // recognised from the messages of the error's source chain.
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return FetchError::Timeout;
        }
        if error.is_redirect() {
            return FetchError::TooManyRedirects;
        }
        if let Some(status) = error.status() {
            return FetchError::Status(status.as_u16());
        }

        classify_failure(error_chain(&error), error.is_connect())
    }
}

// Picks a category from the failure message when no predicate matched
fn classify_failure(message: String, is_connect: bool) -> FetchError {
    let lowered = message.to_lowercase();

    if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        FetchError::Tls(message)
    } else if is_connect {
        if lowered.contains("dns") || lowered.contains("resolve") {
            FetchError::Dns
        } else {
            FetchError::Connect(message)
        }
    } else {
        FetchError::Other(message)
    }
}

// Joins an error and all of its sources into one line
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Error returned by the toolkit's scrape operations.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Malformed URL or configuration; nothing was fetched
    #[error("invalid input `{input}`: {reason}")]
    InvalidInput { input: String, reason: String },

    /// The crawler failed or ran out of time
    #[error("failed to scrape {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The HTTP client backing the default crawler could not be built
    #[error("could not set up HTTP client: {0}")]
    Setup(String),
}

impl ScrapeError {
    pub(crate) fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ScrapeError::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fetch(url: impl Into<String>, source: FetchError) -> Self {
        ScrapeError::Fetch {
            url: url.into(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ScrapeError::InvalidInput { .. })
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, ScrapeError::Fetch { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ScrapeError::Fetch {
                source: FetchError::Timeout,
                ..
            }
        )
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "error trying to connect: dns error: failed to lookup address information: Name or service not known",
        true,
        FetchError::Dns
    )]
    #[case("error trying to connect: failed to resolve host", true, FetchError::Dns)]
    #[case(
        "error trying to connect: invalid peer certificate: UnknownIssuer",
        true,
        FetchError::Tls("error trying to connect: invalid peer certificate: UnknownIssuer".to_string())
    )]
    #[case(
        "error trying to connect: received fatal alert: HandshakeFailure (TLS)",
        true,
        FetchError::Tls("error trying to connect: received fatal alert: HandshakeFailure (TLS)".to_string())
    )]
    #[case(
        "error trying to connect: tcp connect error: Connection refused (os error 111)",
        true,
        FetchError::Connect("error trying to connect: tcp connect error: Connection refused (os error 111)".to_string())
    )]
    #[case("error decoding response body", false, FetchError::Other("error decoding response body".to_string()))]
    #[case("dns-looking text outside a connect failure", false, FetchError::Other("dns-looking text outside a connect failure".to_string()))]
    fn test_classify_failure(#[case] message: &str, #[case] is_connect: bool, #[case] expected: FetchError) {
        assert_eq!(classify_failure(message.to_string(), is_connect), expected);
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(FetchError::Timeout.to_string(), "timed out");
    }

    #[test]
    fn test_scrape_error_kinds() {
        let invalid = ScrapeError::invalid_input("", "URL is empty");
        assert!(invalid.is_invalid_input());
        assert!(!invalid.is_fetch());

        let timeout = ScrapeError::fetch("https://example.com", FetchError::Timeout);
        assert!(timeout.is_fetch());
        assert!(timeout.is_timeout());
        assert_eq!(
            timeout.to_string(),
            "failed to scrape https://example.com: timed out"
        );
    }
}
