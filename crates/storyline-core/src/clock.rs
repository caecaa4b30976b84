//! Wall-clock abstraction.
//!
//! Story timestamps and event metadata read the time through [`Clock`] so
//! generated catalogs and recorded transitions are reproducible in tests.

use chrono::{DateTime, TimeDelta, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the instant `window` before [`Clock::now`].
    fn window_start(&self, window: TimeDelta) -> DateTime<Utc> {
        self.now() - window
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
