//! Tests for the HTTP probe against real listeners

use super::chaos::wait_for_recovery;
use super::probe::*;
use super::target::Target;
use crate::server::terminate::Terminator;
use crate::server::testing::spawn_server;
use crate::server::{serve, AppState};
use crate::shutdown::{shutdown_channel, ShutdownController};
use axum::{http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

fn probe_for(addr: SocketAddr) -> HttpProbe {
    let target = Target::parse(&addr.to_string()).expect("socket addr is a valid target");
    HttpProbe::new(target).expect("client should build")
}

async fn spawn_router(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local addr");
    tokio::spawn(async move { axum::serve(listener, router).await });
    addr
}

/// An address nothing is listening on
async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    listener.local_addr().expect("Listener has no local addr")
}

/// Stands in for the hard exit: stops the server instead of the test binary
struct ShutdownTerminator {
    controller: ShutdownController,
}

impl Terminator for ShutdownTerminator {
    fn terminate(&self, _exit_code: i32) {
        self.controller.shutdown();
    }
}

#[tokio::test]
async fn test_healthcheck_true_for_live_service() {
    let server = spawn_server(AppState::default()).await;

    assert!(probe_for(server.addr).healthcheck().await);

    server.controller.shutdown();
}

#[tokio::test]
async fn test_healthcheck_false_when_connection_refused() {
    let probe = probe_for(closed_addr().await);

    assert!(!probe.healthcheck().await);
}

#[tokio::test]
async fn test_healthcheck_false_for_non_ok_status() {
    for status in [
        StatusCode::SERVICE_UNAVAILABLE,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::NO_CONTENT,
        StatusCode::NOT_FOUND,
    ] {
        let addr = spawn_router(Router::new().route("/health", get(move || async move { status })))
            .await;

        assert!(
            !probe_for(addr).healthcheck().await,
            "{} should count as unhealthy",
            status
        );
    }
}

#[tokio::test]
async fn test_healthcheck_false_on_timeout() {
    let router = Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK
        }),
    );
    let addr = spawn_router(router).await;
    let target = Target::parse(&addr.to_string()).expect("valid target");
    let probe =
        HttpProbe::with_timeout(target, Duration::from_millis(200)).expect("client should build");

    let start = std::time::Instant::now();
    assert!(!probe.healthcheck().await);
    assert!(start.elapsed() < Duration::from_secs(2), "timeout not applied");
}

#[tokio::test]
async fn test_crash_ignores_unreachable_target() {
    let probe = probe_for(closed_addr().await);

    let result = tokio::time::timeout(Duration::from_secs(5), probe.crash()).await;

    assert!(result.is_ok(), "crash() should return after a failed request");
}

/// After `/crash` the service is gone and health checks fail
#[tokio::test]
async fn test_crash_takes_service_down() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local addr");
    let (controller, signal) = shutdown_channel();
    let state = AppState::with_parts(
        Arc::new(crate::server::clock::SystemClock),
        Arc::new(ShutdownTerminator { controller }),
    );
    let handle = tokio::spawn(serve(listener, state, signal));
    let probe = probe_for(addr);
    assert!(probe.healthcheck().await, "service should start healthy");

    probe.crash().await;

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("service should stop after crash")
        .expect("server task should not panic")
        .expect("server should exit cleanly");
    assert!(!probe.healthcheck().await);
    assert!(!probe.healthcheck().await);
}

/// After a restart, the first healthy answer ends the wait
#[tokio::test]
async fn test_wait_for_recovery_returns_on_first_healthy_answer() {
    let up = Arc::new(AtomicBool::new(false));
    let hits = Arc::new(AtomicUsize::new(0));
    let router = {
        let up = up.clone();
        let hits = hits.clone();
        Router::new().route(
            "/health",
            get(move || {
                let up = up.clone();
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if up.load(Ordering::SeqCst) {
                        StatusCode::OK
                    } else {
                        StatusCode::SERVICE_UNAVAILABLE
                    }
                }
            }),
        )
    };
    let addr = spawn_router(router).await;
    let probe = probe_for(addr);

    let flip = up.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        flip.store(true, Ordering::SeqCst);
    });

    let polls = tokio::time::timeout(
        Duration::from_secs(10),
        wait_for_recovery(&probe, Duration::from_millis(50)),
    )
    .await
    .expect("recovery should be observed");

    assert!(polls >= 2, "first polls should see the outage, got {}", polls);
    assert_eq!(hits.load(Ordering::SeqCst), polls as usize);

    // No further polling once recovered
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(hits.load(Ordering::SeqCst), polls as usize);
}
