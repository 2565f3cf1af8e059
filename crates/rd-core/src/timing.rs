//! Wall-clock timing for run reports.

use std::time::{Duration, Instant};

/// A simple timer that measures elapsed time.
#[derive(Debug, Clone)]
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in seconds.
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// True once `limit` has passed since the timer started.
    pub fn exceeded(&self, limit: Duration) -> bool {
        self.elapsed() >= limit
    }
}
