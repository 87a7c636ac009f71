use thiserror::Error;

/// Fatal driver errors
///
/// All of these happen at startup. Once the loop is running, target
/// failures are observations, not errors.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid target address {address:?}: {reason}")]
    InvalidTarget { address: String, reason: String },

    #[error("Invalid crash schedule: min {min}s is greater than max {max}s")]
    InvalidSchedule { min: u64, max: u64 },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
