//! Monotonic clock abstraction
//!
//! Expiry bookkeeping (access tokens) reads time through [`Clock`] so tests
//! can swap in `testing::MockClock` and advance time manually.

use std::time::Instant;

/// Source of monotonic time.
pub trait Clock: Send + Sync + 'static {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Real system clock for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
