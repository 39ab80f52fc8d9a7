// src/parser/mod.rs
// =============================================================================
// The page parsing capability.
//
// The crawler only needs one thing from a page: the words on it and the links
// out of it. PageParser is that capability. The crawler calls it and never
// looks at HTTP or HTML itself.
//
// Submodules:
// - http: the real implementation (reqwest + scraper)
// - html: pulls words and links out of an HTML document
// - fake: an in-memory implementation for tests
// =============================================================================

mod html;
mod http;

#[cfg(test)]
pub mod fake;

pub use http::HttpPageParser;

use crate::error::FetchError;
use crate::profiler::{Interface, Operation, Profiled};
use async_trait::async_trait;

/// What a parser found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Every word on the page, in order, duplicates included
    pub words: Vec<String>,
    /// Absolute URLs the page links to
    pub links: Vec<String>,
}

#[async_trait]
pub trait PageParser: Send + Sync {
    /// Fetches and parses the page at `url`
    async fn parse(&self, url: &str) -> Result<ParsedPage, FetchError>;
}

impl Interface for dyn PageParser {
    const NAME: &'static str = "PageParser";
    const OPERATIONS: &'static [Operation] = &[Operation::measured("parse")];
}

#[async_trait]
impl<T: PageParser> PageParser for Profiled<T> {
    async fn parse(&self, url: &str) -> Result<ParsedPage, FetchError> {
        let _measurement = self.start_measurement("parse");
        self.inner().parse(url).await
    }
}
