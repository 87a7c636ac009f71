use crashloop::config::ServiceConfig;
use crashloop::server::{run_server, AppState};
use crashloop::shutdown::{shutdown_channel, stop_requested, wait_for_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crashloop::logging::init();

    let config = match ServiceConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    info!(port = config.port, "Starting crashloop target service");

    let (shutdown_controller, shutdown_signal) = shutdown_channel();

    tokio::spawn(async move {
        let signal = stop_requested(wait_for_signal()).await;
        info!(signal = signal, "Initiating graceful shutdown");
        shutdown_controller.shutdown();
    });

    if let Err(e) = run_server(config.port, AppState::new(), shutdown_signal).await {
        error!(error = %e, port = config.port, "Target service failed");
        return Err(e.into());
    }

    info!("crashloop target service shut down gracefully");
    Ok(())
}
