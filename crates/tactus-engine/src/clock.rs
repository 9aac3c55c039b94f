//! Monotonic millisecond clock for hosts without native event timestamps.

use web_time::Instant;

/// Hands out monotonic milliseconds since construction. Platforms whose
/// input events already carry timestamps should pass those through
/// instead; this exists for synthetic sources and hosts that only get
/// un-timestamped callbacks.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
