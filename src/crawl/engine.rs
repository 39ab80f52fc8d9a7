// src/crawl/engine.rs
// =============================================================================
// The parallel crawler.
//
// How it works:
// 1. Compute one deadline (now + timeout) for the whole run
// 2. Spawn one task per starting URL
// 3. Each task checks depth, deadline and ignore patterns, then claims its
//    URL. Only the task that wins the claim goes on to parse the page
// 4. The page's words are merged into the shared counts
// 5. One child task is spawned per link, with one less level of depth, and
//    the task waits for all of its children before it finishes
// 6. When every starting URL's tree is done, the shared state becomes the
//    CrawlResult
//
// Tasks run on a tokio runtime owned by the crawler, sized from the
// configured parallelism (never more than the host offers).
//
// The deadline is only checked when a task starts. A page that is already
// being fetched when the deadline passes is allowed to finish.
// =============================================================================

use super::state::CrawlState;
use super::{CrawlResult, WebCrawler};
use crate::clock::Clock;
use crate::config::host_parallelism;
use crate::config::CrawlerConfiguration;
use crate::error::{ConfigError, CrawlError};
use crate::parser::{PageParser, ParsedPage};
use futures::future::{BoxFuture, FutureExt};
use regex::Regex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Knobs for a crawl, usually built from the configuration file
#[derive(Debug, Clone)]
pub struct CrawlerOptions {
    pub max_depth: usize,
    pub timeout: Duration,
    pub popular_word_count: usize,
    pub ignored_urls: Vec<Regex>,
    pub parallelism: usize,
}

impl CrawlerOptions {
    pub fn from_config(config: &CrawlerConfiguration) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_depth: config.max_depth,
            timeout: config.timeout(),
            popular_word_count: config.popular_word_count,
            ignored_urls: config.ignored_url_patterns()?,
            parallelism: config.target_parallelism(),
        })
    }
}

// One step of the crawl: visit `url` with `depth_remaining` levels left
#[derive(Debug, Clone)]
struct CrawlJob {
    url: String,
    depth_remaining: usize,
    // None when the timeout is too large to represent
    deadline: Option<Instant>,
}

impl CrawlJob {
    fn child(&self, link: String) -> Self {
        Self {
            url: link,
            depth_remaining: self.depth_remaining.saturating_sub(1),
            deadline: self.deadline,
        }
    }
}

// Everything a crawl task needs, shared by all tasks of one run
struct CrawlContext {
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    ignored_urls: Vec<Regex>,
    state: CrawlState,
}

impl CrawlContext {
    fn is_ignored(&self, url: &str) -> bool {
        self.ignored_urls.iter().any(|pattern| pattern.is_match(url))
    }

    // The checks a step makes before touching any shared state
    fn should_visit(&self, job: &CrawlJob) -> bool {
        if job.depth_remaining == 0 {
            return false;
        }
        if job.deadline.is_some_and(|deadline| self.clock.now() > deadline) {
            debug!(url = %job.url, "deadline passed, not visiting");
            return false;
        }
        if self.is_ignored(&job.url) {
            debug!(url = %job.url, "ignored URL");
            return false;
        }
        true
    }
}

pub struct ParallelWebCrawler {
    runtime: Runtime,
    parser: Arc<dyn PageParser>,
    clock: Arc<dyn Clock>,
    options: CrawlerOptions,
    parallelism: usize,
}

impl ParallelWebCrawler {
    /// Builds the crawler and its worker pool.
    ///
    /// The pool gets `options.parallelism` threads, clamped to between 1 and
    /// the host's available parallelism.
    pub fn new(
        options: CrawlerOptions,
        parser: Arc<dyn PageParser>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CrawlError> {
        let parallelism = options.parallelism.clamp(1, host_parallelism());
        let runtime = Builder::new_multi_thread()
            .worker_threads(parallelism)
            .thread_name("crawl-worker")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            parser,
            clock,
            options,
            parallelism,
        })
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}

impl WebCrawler for ParallelWebCrawler {
    // Must not be called from inside another tokio runtime: the crawl blocks
    // the calling thread until the whole tree has been visited.
    fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        let deadline = self.clock.now().checked_add(self.options.timeout);
        let context = Arc::new(CrawlContext {
            parser: Arc::clone(&self.parser),
            clock: Arc::clone(&self.clock),
            ignored_urls: self.options.ignored_urls.clone(),
            state: CrawlState::new(),
        });

        info!(
            starting_urls = starting_urls.len(),
            max_depth = self.options.max_depth,
            timeout = ?self.options.timeout,
            parallelism = self.parallelism,
            "starting crawl"
        );

        self.runtime.block_on(async {
            let mut roots = JoinSet::new();
            for url in starting_urls {
                let job = CrawlJob {
                    url: url.clone(),
                    depth_remaining: self.options.max_depth,
                    deadline,
                };
                roots.spawn(crawl_step(Arc::clone(&context), job));
            }
            join_all(roots).await;
        });

        let result = context.state.to_result(self.options.popular_word_count);
        info!(urls_visited = result.urls_visited, "crawl finished");
        result
    }

    fn max_parallelism(&self) -> usize {
        host_parallelism()
    }
}

// Visits one URL and, recursively, everything it links to.
//
// Returns a boxed future because the step spawns copies of itself.
fn crawl_step(context: Arc<CrawlContext>, job: CrawlJob) -> BoxFuture<'static, ()> {
    async move {
        if !context.should_visit(&job) {
            return;
        }

        if !context.state.claim(&job.url) {
            debug!(url = %job.url, "already claimed");
            return;
        }

        debug!(url = %job.url, depth_remaining = job.depth_remaining, "visiting");
        let page = match context.parser.parse(&job.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %job.url, error = %e, "failed to parse page");
                ParsedPage::default()
            }
        };

        context.state.merge_words(&page.words);

        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(crawl_step(Arc::clone(&context), job.child(link)));
        }
        join_all(children).await;
    }
    .boxed()
}

// Waits for every task in the set. A panicking task is logged and does not
// take its siblings down with it.
async fn join_all(mut tasks: JoinSet<()>) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "crawl task failed");
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why BoxFuture?
//    - An async fn that spawns itself has a future type that contains itself
//    - Boxing gives the future a fixed size and a nameable type
//
// 2. What is JoinSet?
//    - A set of spawned tokio tasks owned by the task that spawned them
//    - join_next() yields each task's outcome as it finishes
//    - A step returns only after its JoinSet is empty, so a root task
//      finishing means its whole tree has finished
//
// 3. What happens when a page fails?
//    - The URL stays claimed and counts as visited
//    - It contributes no words and no links
//    - Its siblings and parents carry on as usual
// -----------------------------------------------------------------------------
