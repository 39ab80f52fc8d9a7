// src/parser/fake.rs
// =============================================================================
// An in-memory PageParser for tests.
//
// Pages are registered up front. Unknown URLs fail with HTTP 404, URLs marked
// as failing fail with HTTP 500. Every call is counted so tests can check
// that no page was parsed twice.
// =============================================================================

use super::{PageParser, ParsedPage};
use crate::clock::FakeClock;
use crate::error::FetchError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
pub struct FakePageParser {
    pages: HashMap<String, ParsedPage>,
    failing: HashSet<String>,
    calls: DashMap<String, usize>,
    // Each parse moves this clock forward, to simulate slow pages
    latency: Option<(Arc<FakeClock>, Duration)>,
}

impl FakePageParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, words: &[&str], links: &[&str]) -> Self {
        let page = ParsedPage {
            words: words.iter().map(|w| w.to_string()).collect(),
            links: links.iter().map(|l| l.to_string()).collect(),
        };
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn with_latency(mut self, clock: Arc<FakeClock>, per_call: Duration) -> Self {
        self.latency = Some((clock, per_call));
        self
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls.get(url).map(|count| *count).unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }
}

#[async_trait]
impl PageParser for FakePageParser {
    async fn parse(&self, url: &str) -> Result<ParsedPage, FetchError> {
        *self.calls.entry(url.to_string()).or_insert(0) += 1;
        if let Some((clock, per_call)) = &self.latency {
            clock.advance(*per_call);
        }

        if self.failing.contains(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 500,
            });
        }

        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
