//! Health and crash calls against the target
//!
//! Follows a trait-based pattern so the recovery loop can be tested
//! without a network:
//! - `HealthProbe` trait for abstraction
//! - `HttpProbe` for real targets (reqwest, bounded timeouts)
//! - `ScriptedProbe` for testing

use super::error::DriverError;
use super::target::Target;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Timeout for every single health or crash request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Operations the driver performs against a target
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// `true` only for a `200 OK` from `/health`. Transport errors,
    /// timeouts and any other status are all `false`.
    async fn healthcheck(&self) -> bool;

    /// Fire-and-forget `POST /crash`. Failure is the expected outcome.
    async fn crash(&self);
}

/// Probe that talks HTTP to a real target
pub struct HttpProbe {
    client: reqwest::Client,
    target: Target,
}

impl HttpProbe {
    pub fn new(target: Target) -> Result<Self, DriverError> {
        Self::with_timeout(target, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(target: Target, timeout: Duration) -> Result<Self, DriverError> {
        // No pooling: a kept-alive socket to a killed process says nothing
        // about the replacement.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { client, target })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn healthcheck(&self) -> bool {
        match self.client.get(self.target.endpoint("/health")).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                debug!(status = %response.status(), "Health probe returned non-OK status");
                false
            }
            Err(e) => {
                debug!(error = %e, timeout = e.is_timeout(), "Health probe failed");
                false
            }
        }
    }

    async fn crash(&self) {
        match self.client.post(self.target.endpoint("/crash")).send().await {
            Ok(response) => debug!(status = %response.status(), "Crash request answered"),
            Err(e) => debug!(error = %e, "Crash request got no response"),
        }
    }
}

/// One call observed by a `ScriptedProbe`
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeCall {
    Health(bool),
    Crash,
}

/// Mock probe for testing - replays a fixed sequence of health results
///
/// Once the script runs out, every further healthcheck returns `fallback`.
#[cfg(test)]
pub struct ScriptedProbe {
    script: std::sync::Mutex<std::collections::VecDeque<bool>>,
    fallback: bool,
    calls: std::sync::Mutex<Vec<ProbeCall>>,
}

#[cfg(test)]
impl ScriptedProbe {
    pub fn new(script: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            script: std::sync::Mutex::new(script.into_iter().collect()),
            fallback,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<ProbeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn crash_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == ProbeCall::Crash)
            .count()
    }
}

#[cfg(test)]
#[async_trait]
impl HealthProbe for ScriptedProbe {
    #[allow(clippy::unwrap_used)]
    async fn healthcheck(&self) -> bool {
        let healthy = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);
        self.calls.lock().unwrap().push(ProbeCall::Health(healthy));
        healthy
    }

    #[allow(clippy::unwrap_used)]
    async fn crash(&self) {
        self.calls.lock().unwrap().push(ProbeCall::Crash);
    }
}
