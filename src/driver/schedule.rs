//! Randomized delay before each crash

use super::error::DriverError;
use rand::Rng;
use std::time::Duration;

pub const MIN_CRASH_DELAY_SECS: u64 = 10;
pub const MAX_CRASH_DELAY_SECS: u64 = 30;

/// Closed interval of whole seconds to wait before crashing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrashSchedule {
    min_secs: u64,
    max_secs: u64,
}

impl CrashSchedule {
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self, DriverError> {
        if min_secs > max_secs {
            return Err(DriverError::InvalidSchedule {
                min: min_secs,
                max: max_secs,
            });
        }
        Ok(Self { min_secs, max_secs })
    }

    /// Draw the next delay uniformly from `[min_secs, max_secs]`
    pub fn next_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_secs(rng.gen_range(self.min_secs..=self.max_secs))
    }

    pub fn bounds(&self) -> (u64, u64) {
        (self.min_secs, self.max_secs)
    }
}

impl Default for CrashSchedule {
    fn default() -> Self {
        Self {
            min_secs: MIN_CRASH_DELAY_SECS,
            max_secs: MAX_CRASH_DELAY_SECS,
        }
    }
}
