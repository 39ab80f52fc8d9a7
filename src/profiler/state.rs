// src/profiler/state.rs
// =============================================================================
// Accumulates how long each measured operation took.
//
// Records are keyed by (owner, operation), where owner is the concrete type
// that was wrapped (e.g. "webcrawler::parser::http::HttpPageParser") and
// operation is the method name (e.g. "parse").
//
// Many crawl tasks call measured operations at the same time, so the records
// live in a DashMap: each record() locks only the shard holding its key, and
// only for the duration of the increment.
// =============================================================================

use dashmap::DashMap;
use std::io::{self, Write};
use std::time::Duration;

/// Totals for one (owner, operation) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfilingRecord {
    pub call_count: u64,
    pub total_elapsed: Duration,
}

type RecordKey = (&'static str, &'static str);

#[derive(Debug, Default)]
pub struct ProfilingState {
    records: DashMap<RecordKey, ProfilingRecord>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one call of `elapsed` to the record for (owner, operation)
    pub fn record(&self, owner: &'static str, operation: &'static str, elapsed: Duration) {
        let mut record = self.records.entry((owner, operation)).or_default();
        record.call_count += 1;
        record.total_elapsed += elapsed;
    }

    #[cfg(test)]
    pub fn get(&self, owner: &str, operation: &str) -> Option<ProfilingRecord> {
        self.records
            .iter()
            .find(|entry| entry.key().0 == owner && entry.key().1 == operation)
            .map(|entry| *entry.value())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // A copy of every record, sorted by owner then operation so the report
    // reads the same no matter which thread recorded first.
    pub fn snapshot(&self) -> Vec<(&'static str, &'static str, ProfilingRecord)> {
        let mut records: Vec<_> = self
            .records
            .iter()
            .map(|entry| (entry.key().0, entry.key().1, *entry.value()))
            .collect();
        records.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        records
    }

    /// Writes one line per record
    pub fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        for (owner, operation, record) in self.snapshot() {
            writeln!(
                writer,
                "{}#{} took {} ({} {})",
                owner,
                operation,
                format_duration(record.total_elapsed),
                record.call_count,
                if record.call_count == 1 { "call" } else { "calls" },
            )?;
        }
        Ok(())
    }
}

// Formats a duration as "1m 2s 345ms"
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    format!(
        "{}m {}s {}ms",
        total_ms / 60_000,
        (total_ms / 1_000) % 60,
        total_ms % 1_000
    )
}
