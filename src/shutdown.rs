//! Graceful shutdown handling
//!
//! SIGTERM and SIGINT stop both binaries cleanly: the target service stops
//! accepting and drains in-flight requests, the chaos driver leaves its
//! loop. This is the opposite of `/crash`, which exits without any of that.

use std::future::Future;
use tokio::sync::watch;
use tracing::{info, warn};

/// Lets the HTTP server find out it should stop accepting connections
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolves once shutdown is requested or the controller is dropped
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                break;
            }
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Owned by whoever decides the server should stop (signal task, tests)
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn shutdown(&self) {
        let _ = self.sender.send(true);
        info!("Graceful shutdown requested");
    }
}

/// Pair a controller with the signal handed to `server::serve`
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// Wait for SIGTERM or SIGINT
///
/// Returns the name of the signal that was received, or an error if the
/// handlers could not be registered.
#[cfg(unix)]
pub async fn wait_for_signal() -> Result<&'static str, std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!(signal = name, "Received termination signal");
    Ok(name)
}

/// Wait for Ctrl+C (non-unix)
#[cfg(not(unix))]
pub async fn wait_for_signal() -> Result<&'static str, std::io::Error> {
    tokio::signal::ctrl_c().await?;
    info!(signal = "CTRL_C", "Received termination signal");
    Ok("CTRL_C")
}

/// Resolve with the signal name, or never if handlers are unavailable
///
/// Both binaries keep running without signal handling rather than exiting:
/// the process can still be killed, it just won't stop gracefully.
pub async fn stop_requested<F>(signal: F) -> &'static str
where
    F: Future<Output = Result<&'static str, std::io::Error>>,
{
    match signal.await {
        Ok(name) => name,
        Err(e) => {
            warn!(error = %e, "Signal handlers unavailable, graceful shutdown disabled");
            std::future::pending().await
        }
    }
}

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod tests;
