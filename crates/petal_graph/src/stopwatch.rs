use std::time::{Duration, Instant};

use tracing::debug;

/// Measures one named phase of a planning call and reports it at debug level.
pub struct Stopwatch<'a> {
    start_time: Instant,
    phase: &'a str,
}

impl<'a> Stopwatch<'a> {
    pub fn start(phase: &'a str) -> Self {
        Self {
            start_time: Instant::now(),
            phase,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the elapsed time together with the number of items the phase produced.
    pub fn report(&self, items: usize) -> Duration {
        let elapsed = self.elapsed();
        debug!(
            phase = self.phase,
            items,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "phase finished"
        );
        elapsed
    }
}
