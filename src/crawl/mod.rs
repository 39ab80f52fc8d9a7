// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Parallel crawling: one task per URL on a bounded worker pool
// - Each URL is visited at most once, even when pages link in cycles
// - Depth limit and a global time budget
// - Ignored URL patterns
//
// Submodules:
// - engine: ParallelWebCrawler, the crawl itself
// - state: the visited set and word counts shared by all crawl tasks
// - result: CrawlResult, top-word selection and the JSON writer
// =============================================================================

mod engine;
mod result;
mod state;

pub use engine::{CrawlerOptions, ParallelWebCrawler};
pub use result::{CrawlResult, CrawlResultWriter};

use crate::profiler::{Interface, Operation, Profiled};

/// Something that can crawl a set of starting pages
pub trait WebCrawler: Send + Sync {
    /// Crawls from `starting_urls` and reports what was found
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult;

    /// The most worker threads this crawler can make use of
    fn max_parallelism(&self) -> usize;
}

impl Interface for dyn WebCrawler {
    const NAME: &'static str = "WebCrawler";
    const OPERATIONS: &'static [Operation] = &[
        Operation::measured("crawl"),
        Operation::forwarded("max_parallelism"),
    ];
}

impl<T: WebCrawler> WebCrawler for Profiled<T> {
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let _measurement = self.start_measurement("crawl");
        self.inner().crawl(starting_urls)
    }

    fn max_parallelism(&self) -> usize {
        self.inner().max_parallelism()
    }
}
