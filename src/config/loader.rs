// src/config/loader.rs
// =============================================================================
// Loads and validates the crawler configuration.
//
// serde does the heavy lifting: field names are camelCase in the JSON file
// and snake_case in Rust, and every field has a default so a minimal file
// like {"startPages": ["https://example.com"]} is enough.
// =============================================================================

use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything the crawler needs to know before it starts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrawlerConfiguration {
    /// URLs the crawl starts from
    pub start_pages: Vec<String>,
    /// Regexes; a URL that fully matches any of them is never visited
    pub ignored_urls: Vec<String>,
    /// Regexes; a word that fully matches any of them is never counted
    pub ignored_words: Vec<String>,
    /// Worker threads to use. None means "whatever the host offers"
    pub parallelism: Option<usize>,
    /// How many links deep to follow. 0 means visit nothing
    pub max_depth: usize,
    /// Global time budget for the whole crawl
    pub timeout_seconds: u64,
    /// How many of the most popular words to report
    pub popular_word_count: usize,
    /// Where to append the crawl result. Empty means stdout
    pub result_path: String,
    /// Where to append the profiling report. Empty means stdout
    pub profile_output_path: String,
}

impl Default for CrawlerConfiguration {
    fn default() -> Self {
        Self {
            start_pages: Vec::new(),
            ignored_urls: Vec::new(),
            ignored_words: Vec::new(),
            parallelism: None,
            max_depth: 0,
            timeout_seconds: 1,
            popular_word_count: 0,
            result_path: String::new(),
            profile_output_path: String::new(),
        }
    }
}

impl CrawlerConfiguration {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    // The requested worker count. The crawler clamps this to the host's
    // available parallelism when it builds its pool.
    pub fn target_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(host_parallelism)
    }

    pub fn ignored_url_patterns(&self) -> Result<Vec<Regex>, ConfigError> {
        compile_patterns(&self.ignored_urls)
    }

    pub fn ignored_word_patterns(&self) -> Result<Vec<Regex>, ConfigError> {
        compile_patterns(&self.ignored_words)
    }

    /// Checks everything that can be checked without touching the network
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallelism == Some(0) {
            return Err(ConfigError::ZeroParallelism);
        }
        self.ignored_url_patterns()?;
        self.ignored_word_patterns()?;
        Ok(())
    }
}

/// Reads a CrawlerConfiguration from a JSON file
#[derive(Debug, Clone)]
pub struct ConfigurationLoader {
    path: PathBuf,
}

impl ConfigurationLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads and validates the configuration at this loader's path
    pub fn load(&self) -> Result<CrawlerConfiguration, ConfigError> {
        let file = File::open(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        Self::read(BufReader::new(file))
    }

    /// Parses and validates a configuration from any reader
    pub fn read(reader: impl Read) -> Result<CrawlerConfiguration, ConfigError> {
        let config: CrawlerConfiguration = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Compiles each pattern so that it must match the whole string, not just a
// piece of it. "example\.com" should not ignore "https://example.com/page".
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })
        })
        .collect()
}

pub fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
