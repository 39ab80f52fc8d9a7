// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the JSON configuration and apply command-line overrides
// 3. Build the page parser and the crawler, both wrapped by the profiler
// 4. Crawl, then write the result and the profiling report
// 5. Exit with proper code (0 = success, 2 = error)
//
// main() is a plain function, not #[tokio::main]: the crawler owns its own
// tokio runtime, sized from the configured parallelism.
// =============================================================================

mod cli;
mod clock;
mod config;
mod crawl;
mod error;
mod parser;
mod profiler;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use clock::{Clock, SystemClock};
use config::{ConfigurationLoader, CrawlerConfiguration};
use crawl::{CrawlResult, CrawlResultWriter, CrawlerOptions, ParallelWebCrawler, WebCrawler};
use parser::{HttpPageParser, PageParser};
use profiler::Profiler;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

// No single request may take longer than this, whatever the crawl timeout
const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loader = ConfigurationLoader::new(&cli.config);
    let mut config = loader
        .load()
        .with_context(|| format!("could not load configuration from {}", loader.path().display()))?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid command-line override")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Profiler::new(Arc::clone(&clock));

    let parser = HttpPageParser::new(
        config.timeout().min(MAX_REQUEST_TIMEOUT),
        config.ignored_word_patterns()?,
    )
    .context("failed to create HTTP client")?;
    let parser: Arc<dyn PageParser> = Arc::new(profiler.wrap::<dyn PageParser, _>(parser)?);

    let crawler = ParallelWebCrawler::new(CrawlerOptions::from_config(&config)?, parser, clock)?;
    let crawler = profiler.wrap::<dyn WebCrawler, _>(crawler)?;

    info!(
        "crawling {} starting page(s) with {} worker(s), max depth {}, timeout {:?}",
        config.start_pages.len(),
        crawler.inner().parallelism(),
        config.max_depth,
        config.timeout()
    );
    let result = crawler.crawl(&config.start_pages);
    info!(
        "visited {} page(s), {} popular word(s)",
        result.urls_visited,
        result.word_counts.len()
    );

    write_result(&result, &config)?;
    write_profile(&profiler, &config)?;
    Ok(())
}

// Logs go to stderr so they never mix with a result written to stdout
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info,webcrawler=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_result(result: &CrawlResult, config: &CrawlerConfiguration) -> Result<()> {
    let writer = CrawlResultWriter::new(result);
    if config.result_path.is_empty() {
        let mut stdout = io::stdout().lock();
        writer.write(&mut stdout)?;
        writeln!(stdout)?;
    } else {
        let path = Path::new(&config.result_path);
        writer
            .write_to_path(path)
            .with_context(|| format!("failed to write crawl result to {}", path.display()))?;
        info!("crawl result written to {}", path.display());
    }
    Ok(())
}

fn write_profile(profiler: &Profiler, config: &CrawlerConfiguration) -> Result<()> {
    if config.profile_output_path.is_empty() {
        let mut stdout = io::stdout().lock();
        profiler.write_data(&mut stdout)?;
    } else {
        let path = Path::new(&config.profile_output_path);
        profiler
            .write_data_to_path(path)
            .with_context(|| format!("failed to write profiling data to {}", path.display()))?;
        info!("profiling data written to {}", path.display());
    }
    Ok(())
}
