//! Resize debouncing
//!
//! Collapses a burst of triggers into a single action that runs once the
//! triggers have been quiet for a fixed period. Every trigger resets the
//! timer, so only the last trigger in a burst counts.
//!
//! ```ignore
//! let mut debouncer = Debouncer::default();
//!
//! // On every resize event
//! debouncer.trigger();
//!
//! // On every tick of the host loop
//! if debouncer.poll() {
//!     regenerate();
//! }
//! ```
//!
//! The `_at` variants take an explicit instant for testing.

use std::time::{Duration, Instant};

/// Quiet period before a resize burst regenerates the field
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Reset-on-trigger timer
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    last_trigger: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_trigger: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Arm the timer, replacing any pending deadline
    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    /// Arm the timer at a specific time
    pub fn trigger_at(&mut self, now: Instant) {
        self.last_trigger = Some(now);
    }

    /// Whether a trigger is waiting for its quiet period
    pub fn is_pending(&self) -> bool {
        self.last_trigger.is_some()
    }

    /// Drop any pending trigger
    pub fn cancel(&mut self) {
        self.last_trigger = None;
    }

    /// Fire if the quiet period has elapsed
    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Fire if the quiet period has elapsed at `now`
    ///
    /// Returns `true` at most once per burst.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        match self.last_trigger {
            Some(last) if now.saturating_duration_since(last) >= self.quiet => {
                self.last_trigger = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending trigger fires
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.last_trigger
            .map(|last| self.quiet.saturating_sub(now.saturating_duration_since(last)))
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
