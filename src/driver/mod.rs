//! Chaos driver: crashes the target on a random schedule and waits for
//! an external supervisor to bring it back.

pub mod chaos;
pub mod cli;
mod error;
pub mod probe;
pub mod schedule;
pub mod target;

pub use chaos::{wait_for_recovery, ChaosDriver, CycleReport, DriverConfig, Phase};
pub use cli::ChaosArgs;
pub use error::DriverError;
pub use probe::{HealthProbe, HttpProbe};
pub use schedule::CrashSchedule;
pub use target::Target;

#[cfg(test)]
#[path = "chaos_test.rs"]
mod chaos_tests;

#[cfg(test)]
#[path = "probe_test.rs"]
mod probe_tests;
