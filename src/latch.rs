//! Reset gap pacing between frames.
//!
//! The data line has to stay low for at least the latch duration after a
//! frame before the next one starts, otherwise the strip treats both as a
//! single frame. The gate remembers when the last transfer finished and
//! blocks the caller for whatever part of the gap is still pending.

use embassy_time::{Duration, Instant, block_for};

/// Enforces the latch floor between consecutive writes
#[derive(Debug, Clone, Copy)]
pub struct LatchGate {
    latch: Duration,
    last_write: Option<Instant>,
}

impl LatchGate {
    pub const fn new(latch: Duration) -> Self {
        Self {
            latch,
            last_write: None,
        }
    }

    /// Latch duration enforced by this gate
    pub const fn latch(&self) -> Duration {
        self.latch
    }

    /// Time still to wait at `now` before the bus may be written again
    pub fn remaining(&self, now: Instant) -> Duration {
        let Some(last_write) = self.last_write else {
            return Duration::from_ticks(0);
        };
        let ready_at = last_write + self.latch;
        if ready_at > now {
            ready_at - now
        } else {
            Duration::from_ticks(0)
        }
    }

    /// Block until the latch gap after the previous write has elapsed
    pub fn wait(&self) {
        let remaining = self.remaining(Instant::now());
        if remaining.as_ticks() > 0 {
            block_for(remaining);
        }
    }

    /// Record that a frame has just been written
    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    pub(crate) fn mark_at(&mut self, now: Instant) {
        self.last_write = Some(now);
    }
}
