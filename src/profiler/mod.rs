// src/profiler/mod.rs
// =============================================================================
// Method-level profiler.
//
// How it works:
// 1. A capability trait declares which of its operations are measured
//    (interface.rs).
// 2. Profiler::wrap() puts an implementation inside Profiled<T>, which
//    implements the same trait and times the measured operations.
// 3. Timings accumulate in a shared ProfilingState (state.rs).
// 4. write_data() renders a report headed by the time the profiler was
//    created.
//
// Submodules:
// - interface: operation manifests
// - state: thread-safe timing records
// - wrapper: the Profiled<T> forwarding wrapper
// =============================================================================

mod interface;
mod state;
mod wrapper;

pub use interface::{Interface, Operation};
pub use wrapper::Profiled;

use crate::clock::Clock;
use crate::error::ProfilerError;
use chrono::{DateTime, Utc};
use state::ProfilingState;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct Profiler {
    clock: Arc<dyn Clock>,
    state: Arc<ProfilingState>,
    start_time: DateTime<Utc>,
}

impl Profiler {
    /// Creates a profiler whose report is stamped with the current time
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_start_time(clock, Utc::now())
    }

    pub fn with_start_time(clock: Arc<dyn Clock>, start_time: DateTime<Utc>) -> Self {
        Self {
            clock,
            state: Arc::new(ProfilingState::new()),
            start_time,
        }
    }

    /// Wraps `target` so that every measured operation of interface `I` is
    /// timed. The returned Profiled<T> implements `I` whenever T does.
    ///
    /// Fails with `ProfilerError::InvalidTarget` if `I` has nothing to measure.
    ///
    /// ```ignore
    /// let parser = profiler.wrap::<dyn PageParser, _>(HttpPageParser::new(timeout, words)?)?;
    /// ```
    pub fn wrap<I, T>(&self, target: T) -> Result<Profiled<T>, ProfilerError>
    where
        I: Interface + ?Sized,
    {
        let measured = I::measured_operations();
        if measured.is_empty() {
            return Err(ProfilerError::InvalidTarget { interface: I::NAME });
        }

        debug!(
            interface = I::NAME,
            target = std::any::type_name::<T>(),
            ?measured,
            "profiling capability"
        );
        Ok(Profiled::new(target, Arc::clone(&self.state), Arc::clone(&self.clock)))
    }

    #[cfg(test)]
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    /// Writes the report: a "Run at" header, one line per record, a blank line
    pub fn write_data(&self, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "Run at {}", format_rfc1123(&self.start_time))?;
        self.state.write(writer)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn write_data_to_path(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_data(&mut writer)
    }

    #[cfg(test)]
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_data(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

// e.g. "Tue, 3 Jun 2008 11:05:30 GMT"
fn format_rfc1123(time: &DateTime<Utc>) -> String {
    time.format("%a, %-d %b %Y %H:%M:%S GMT").to_string()
}
