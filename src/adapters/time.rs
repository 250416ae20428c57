//! Monotonic time source.
//!
//! The control core works in plain milliseconds; this adapter is where
//! they come from. Copyable, so transport threads can stamp commands on
//! the same time base the control loop ticks on.

use std::time::Instant;

use crate::app::context::Millis;

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created (monotonic).
    pub fn uptime_ms(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}
