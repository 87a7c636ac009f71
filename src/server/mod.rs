//! Target service: the HTTP process the chaos driver keeps killing
//!
//! Exposes liveness and status probes plus a self-terminate endpoint.
//! Graceful shutdown (see `crate::shutdown`) is separate from the hard crash.

mod app;
pub mod clock;
pub mod terminate;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{build_router, run_server, serve, AppState, HealthResponse, StatusResponse};

#[cfg(test)]
#[path = "app_test.rs"]
mod app_tests;
