// src/error.rs
// =============================================================================
// Typed errors for the crawler.
//
// Which errors are fatal?
// - FetchError: never. One bad page only loses that page's words and links.
// - ProfilerError: only the wrap() call that caused it.
// - ConfigError / CrawlError: yes, but they happen before any page is fetched.
//
// The binary (main.rs) wraps these in anyhow::Error with extra context.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Failure to fetch or parse a single page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (DNS, connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The URL could not be parsed
    #[error("invalid URL '{url}'")]
    InvalidUrl { url: String },
}

/// Misuse of the profiler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfilerError {
    /// The interface has no measured operations, so wrapping it would
    /// silently profile nothing
    #[error("{interface} has no measured operations; refusing to wrap it")]
    InvalidTarget { interface: &'static str },
}

/// Problems with the crawler configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("parallelism must be at least 1")]
    ZeroParallelism,
}

/// Errors that stop a crawl before it starts
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to build the crawl worker pool: {0}")]
    Runtime(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "https://example.com/missing".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "https://example.com/missing returned HTTP 404");
    }

    #[test]
    fn test_invalid_target_message_names_interface() {
        let err = ProfilerError::InvalidTarget { interface: "Greeter" };
        assert!(err.to_string().starts_with("Greeter has no measured operations"));
    }
}
