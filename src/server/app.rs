//! HTTP endpoints of the target service
//!
//! - `/` - Static informational page
//! - `/health` - Liveness: always 200 while the process is alive
//! - `/status` - Status indicator and uptime (also served at `/api/status`)
//! - `/crash` - Kills the process without cleanup

use crate::server::clock::{Clock, SystemClock};
use crate::server::terminate::{ProcessAbort, Terminator, CRASH_EXIT_CODE};
use crate::shutdown::ShutdownSignal;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    /// Whole seconds since the process started
    pub uptime: u64,
    pub started_at: DateTime<Utc>,
}

/// Shared state for all handlers
///
/// The start instant is captured once at construction and never changes,
/// so uptime can only grow for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    clock: Arc<dyn Clock>,
    started: Instant,
    started_at: DateTime<Utc>,
    terminator: Arc<dyn Terminator>,
}

impl AppState {
    /// Production state: system clock and a real process abort
    pub fn new() -> Self {
        Self::with_parts(Arc::new(SystemClock), Arc::new(ProcessAbort))
    }

    pub fn with_parts(clock: Arc<dyn Clock>, terminator: Arc<dyn Terminator>) -> Self {
        let started = clock.now();
        Self {
            clock,
            started,
            started_at: Utc::now(),
            terminator,
        }
    }

    /// Time elapsed since the process started, never negative
    pub fn uptime(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.started)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
        uptime: state.uptime().as_secs(),
        started_at: state.started_at,
    })
}

/// Crash handler
///
/// With `ProcessAbort` this never returns and the caller gets no response.
async fn crash(State(state): State<AppState>) -> StatusCode {
    warn!(
        uptime_secs = state.uptime().as_secs(),
        exit_code = CRASH_EXIT_CODE,
        "Crash requested, terminating immediately"
    );
    state.terminator.terminate(CRASH_EXIT_CODE);
    StatusCode::ACCEPTED
}

/// Build the router for all target service endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/api/status", get(status))
        .route("/crash", post(crash))
        .with_state(state)
}

/// Serve on an already-bound listener until `shutdown` fires
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: ShutdownSignal,
) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
}

/// Bind `0.0.0.0:port` and serve
///
/// The service is Serving once the bind succeeds; a bind failure is
/// returned to the caller and the service never leaves Starting.
pub async fn run_server(
    port: u16,
    state: AppState,
    shutdown: ShutdownSignal,
) -> Result<(), std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(port = %port, "Target service listening (HTTP)");

    serve(listener, state, shutdown).await?;

    info!("Target service stopped gracefully");
    Ok(())
}
