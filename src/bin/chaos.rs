use clap::Parser;
use crashloop::driver::{ChaosArgs, ChaosDriver, DriverConfig, HttpProbe};
use crashloop::shutdown::{stop_requested, wait_for_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Usage errors exit here, before any network call
    let args = ChaosArgs::parse();

    crashloop::logging::init();

    let probe = match HttpProbe::new(args.target) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Failed to set up HTTP probe");
            return Err(e.into());
        }
    };
    info!(address = %probe.target(), "Chaos test started");

    let mut driver = ChaosDriver::new(probe, DriverConfig::default());

    tokio::select! {
        _ = driver.run() => {}
        signal = stop_requested(wait_for_signal()) => {
            info!(signal = signal, "Chaos test stopped");
        }
    }

    Ok(())
}
