// src/crawl/state.rs
// =============================================================================
// Shared state for one crawl run.
//
// Two things are shared between every crawl task:
// - visited: the URLs some task has claimed
// - word_counts: how often each word has been seen so far
//
// Both are dashmap collections, so each operation is atomic on its own and no
// task ever holds a lock while it fetches a page.
// =============================================================================

use super::result::CrawlResult;
use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CrawlState {
    visited: DashSet<String>,
    word_counts: DashMap<String, usize>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the calling task.
    ///
    /// Returns true for exactly one caller per URL, however many tasks race
    /// for it. Every later caller gets false and must leave the URL alone.
    pub fn claim(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    #[cfg(test)]
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Adds one page's words to the running totals.
    ///
    /// Addition commutes, so the totals come out the same whatever order the
    /// pages are merged in.
    pub fn merge_words<S: AsRef<str>>(&self, words: &[S]) {
        // Count locally first so each distinct word touches the map once
        let mut page_counts: HashMap<&str, usize> = HashMap::new();
        for word in words {
            *page_counts.entry(word.as_ref()).or_insert(0) += 1;
        }

        for (word, count) in page_counts {
            *self.word_counts.entry(word.to_string()).or_insert(0) += count;
        }
    }

    pub fn word_counts(&self) -> HashMap<String, usize> {
        self.word_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Reads the state out into a result with the `popular_word_count` top words
    pub fn to_result(&self, popular_word_count: usize) -> CrawlResult {
        CrawlResult::new(self.visited_count(), self.word_counts(), popular_word_count)
    }
}
