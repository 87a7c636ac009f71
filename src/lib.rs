//! Crash-and-recover testing harness
//!
//! - `server`: target service with health, status and self-terminate endpoints
//! - `driver`: chaos driver that crashes the target and waits for recovery

pub mod config;
pub mod driver;
pub mod logging;
pub mod server;
pub mod shutdown;
