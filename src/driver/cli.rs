//! Command line of the chaos driver

use super::target::Target;
use clap::Parser;

/// Repeatedly crash a target service and wait for it to come back
#[derive(Debug, Parser)]
#[command(name = "crashloop-chaos")]
#[command(version, about, long_about = None)]
pub struct ChaosArgs {
    /// Target host or IP (optionally host:port), reached over plain HTTP
    pub target: Target,
}
