// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   webcrawler config.json
//   webcrawler config.json --parallelism 8 --result-path out/result.json
//
// Everything about the crawl lives in the JSON configuration file. The flags
// only override where output goes and how many threads to use.
// =============================================================================

use crate::config::CrawlerConfiguration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "webcrawler",
    version,
    about = "Crawl web pages in parallel and report the most popular words",
    long_about = "webcrawler starts from the pages listed in a JSON configuration file, follows links \
                  up to a depth and time limit, and reports the most popular words it found along \
                  with profiling data for the crawl."
)]
pub struct Cli {
    /// Path to the JSON crawler configuration
    pub config: PathBuf,

    /// Append the crawl result here instead of the configured resultPath
    #[arg(long)]
    pub result_path: Option<String>,

    /// Append the profiling report here instead of the configured profileOutputPath
    #[arg(long)]
    pub profile_output_path: Option<String>,

    /// Worker threads to use instead of the configured parallelism
    #[arg(long)]
    pub parallelism: Option<usize>,

    /// Log each page visited (same as RUST_LOG=webcrawler=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut CrawlerConfiguration) {
        if let Some(path) = &self.result_path {
            config.result_path = path.clone();
        }
        if let Some(path) = &self.profile_output_path {
            config.profile_output_path = path.clone();
        }
        if let Some(parallelism) = self.parallelism {
            config.parallelism = Some(parallelism);
        }
    }
}
