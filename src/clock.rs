// src/clock.rs
// =============================================================================
// A tiny clock abstraction.
//
// The crawler checks a global deadline and the profiler measures elapsed time.
// Both read "now" through the Clock trait so tests can control time instead
// of sleeping.
// =============================================================================

use std::time::Instant;

/// Source of monotonic instants
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock, backed by `Instant::now()`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub use fake::FakeClock;


#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fake_clock_only_moves_when_advanced() {
        let clock = FakeClock::new();
        let start = clock.now();
        assert_eq!(clock.now(), start);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));
    }
}
