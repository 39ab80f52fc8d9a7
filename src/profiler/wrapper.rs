// src/profiler/wrapper.rs
// =============================================================================
// Profiled<T>: a transparent wrapper around a capability.
//
// Profiled<T> implements the same capability trait as T (see the impls next
// to PageParser and WebCrawler). Each measured method starts a Measurement,
// forwards the call, and lets the Measurement record the elapsed time when it
// is dropped. Dropping happens on every exit path: Ok, Err, a panic unwinding
// through the call, or an async call being cancelled. The wrapper never
// touches the return value.
// =============================================================================

use super::state::ProfilingState;
use crate::clock::Clock;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

pub struct Profiled<T> {
    inner: T,
    state: Arc<ProfilingState>,
    clock: Arc<dyn Clock>,
}

impl<T> Profiled<T> {
    pub(super) fn new(inner: T, state: Arc<ProfilingState>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            state,
            clock,
        }
    }

    /// The wrapped implementation, for forwarding calls
    pub fn inner(&self) -> &T {
        &self.inner
    }

    // Identity of the wrapped implementation in the report
    fn owner() -> &'static str {
        std::any::type_name::<T>()
    }

    /// Starts timing one call of `operation`. The call is recorded when the
    /// returned guard is dropped.
    pub fn start_measurement(&self, operation: &'static str) -> Measurement<'_> {
        Measurement {
            state: &self.state,
            clock: self.clock.as_ref(),
            owner: Self::owner(),
            operation,
            started: self.clock.now(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Profiled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profiled").field("inner", &self.inner).finish()
    }
}

/// An in-flight measured call
#[must_use = "the call is recorded when the measurement is dropped"]
pub struct Measurement<'a> {
    state: &'a ProfilingState,
    clock: &'a dyn Clock,
    owner: &'static str,
    operation: &'static str,
    started: Instant,
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        let elapsed = self.clock.now().saturating_duration_since(self.started);
        self.state.record(self.owner, self.operation, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use std::time::Duration;

    struct Worker;

    #[test]
    fn test_measurement_records_on_drop() {
        let state = Arc::new(ProfilingState::new());
        let clock = Arc::new(FakeClock::new());
        let profiled = Profiled::new(Worker, state.clone(), clock.clone());

        {
            let _measurement = profiled.start_measurement("work");
            clock.advance(Duration::from_millis(40));
            assert!(state.is_empty());
        }

        let record = state.get(std::any::type_name::<Worker>(), "work").unwrap();
        assert_eq!(record.call_count, 1);
        assert_eq!(record.total_elapsed, Duration::from_millis(40));
    }

    #[test]
    fn test_measurement_records_when_call_panics() {
        let state = Arc::new(ProfilingState::new());
        let clock = Arc::new(FakeClock::new());
        let profiled = Profiled::new(Worker, state.clone(), clock);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _measurement = profiled.start_measurement("explode");
            panic!("boom");
        }));

        assert!(outcome.is_err());
        let record = state.get(std::any::type_name::<Worker>(), "explode").unwrap();
        assert_eq!(record.call_count, 1);
    }
}
