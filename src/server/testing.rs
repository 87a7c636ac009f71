//! Test harness for running the target service on an ephemeral port

use super::app::{serve, AppState};
use crate::shutdown::{shutdown_channel, ShutdownController};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A target service running in the background of a test
pub struct TestServer {
    pub addr: SocketAddr,
    pub controller: ShutdownController,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:41234`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Bind `127.0.0.1:0` and serve `state` in a background task
///
/// The listener is bound before returning, so requests made right after
/// this call are accepted.
#[allow(clippy::expect_used)]
pub async fn spawn_server(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local addr");
    let (controller, signal) = shutdown_channel();
    let handle = tokio::spawn(serve(listener, state, signal));

    TestServer {
        addr,
        controller,
        handle,
    }
}
