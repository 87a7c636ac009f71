//! Monotonic clock abstraction for uptime reporting
//!
//! Production code uses `SystemClock` which delegates to `Instant::now()`.
//! Tests use `MockClock` to move time forward deterministically.

use std::time::Instant;

/// Source of monotonic time
///
/// Injected via `AppState` so uptime can be tested without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by the OS monotonic clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Mock clock for testing with controllable time
#[cfg(test)]
#[allow(clippy::expect_used)]
pub struct MockClock {
    now: std::sync::Mutex<Instant>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockClock {
    pub fn new(now: Instant) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn advance(&self, duration: std::time::Duration) {
        let mut now = self.now.lock().expect("MockClock lock poisoned");
        *now += duration;
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("MockClock lock poisoned")
    }
}
