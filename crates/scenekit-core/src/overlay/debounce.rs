//! Cancellable delayed trigger driven by an external clock.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default quiet period before pending edits are committed.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Fires once after `quiet_period` has elapsed with no further [`Debounce::arm`] calls.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet_period: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debounce {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn set_quiet_period(&mut self, quiet_period: Duration) {
        self.quiet_period = quiet_period;
    }

    /// Cancel any pending trigger and schedule a new one relative to `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
