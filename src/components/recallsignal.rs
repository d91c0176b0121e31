//! Debounced recall gesture source.
//!
//! The hand entity carries a [`RecallSignal`]. Input code sets `active`
//! whenever it likes; the
//! [`recall_poll_system`](crate::systems::recallpoll::recall_poll_system)
//! accumulates elapsed time and reports the current value once per
//! `interval`, so the axe sees a steady cadence of checks instead of
//! per-tick jitter.

use bevy_ecs::prelude::Component;

/// Default time between two recall checks, in seconds.
pub const DEFAULT_POLL_INTERVAL: f32 = 0.5;

#[derive(Component, Clone, Copy, Debug)]
pub struct RecallSignal {
    /// Whether the recall gesture is currently held.
    pub active: bool,
    /// Seconds between two reports.
    pub interval: f32,
    /// Time accumulated since the last report.
    pub accumulator: f32,
}

impl Default for RecallSignal {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl RecallSignal {
    pub fn new(interval: f32) -> Self {
        Self {
            active: false,
            interval,
            accumulator: 0.0,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Advance the debounce clock. Returns true when a report is due.
    ///
    /// At most one report fires per call; a single long tick does not
    /// produce a burst of reports.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.interval <= 0.0 {
            return true;
        }
        self.accumulator += dt.max(0.0);
        if self.accumulator >= self.interval {
            self.accumulator %= self.interval;
            true
        } else {
            false
        }
    }
}
