//! The chaos loop: probe, sleep, crash, wait for recovery, repeat
//!
//! Everything runs sequentially on one task. Individual requests are
//! bounded by the probe's timeout; waiting for recovery is not bounded.

use super::probe::HealthProbe;
use super::schedule::CrashSchedule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between health polls while waiting for recovery
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Driver state, attached to log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Probing,
    Sleeping,
    Crashing,
    Recovering,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Probing => "probing",
            Phase::Sleeping => "sleeping",
            Phase::Crashing => "crashing",
            Phase::Recovering => "recovering",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub poll_interval: Duration,
    pub schedule: CrashSchedule,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            schedule: CrashSchedule::default(),
        }
    }
}

/// What happened during one pass of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Polls spent waiting because the target was already down at the start
    pub pre_crash_recovery_polls: Option<u32>,
    pub crash_delay: Duration,
    /// Polls until the target answered again after the crash
    pub recovery_polls: u32,
}

/// Poll until the target is healthy again
///
/// Returns right after the first healthy response, with the number of polls
/// it took. Sleeps `interval` only after an unhealthy poll. There is no
/// upper bound: a target that never recovers keeps this waiting forever.
pub async fn wait_for_recovery<P>(probe: &P, interval: Duration) -> u32
where
    P: HealthProbe + ?Sized,
{
    info!(phase = %Phase::Recovering, "Waiting for healing and replacement");
    let mut polls: u32 = 0;
    loop {
        polls = polls.saturating_add(1);
        if probe.healthcheck().await {
            info!(phase = %Phase::Recovering, polls, "Instance recovered");
            return polls;
        }
        info!(
            phase = %Phase::Recovering,
            polls,
            retry_in_secs = interval.as_secs(),
            "Instance still unhealthy, rechecking"
        );
        tokio::time::sleep(interval).await;
    }
}

/// Repeatedly crashes a target and waits for something else to bring it back
pub struct ChaosDriver<P, R = StdRng> {
    probe: P,
    config: DriverConfig,
    rng: R,
}

impl<P: HealthProbe> ChaosDriver<P, StdRng> {
    pub fn new(probe: P, config: DriverConfig) -> Self {
        Self::with_rng(probe, config, StdRng::from_entropy())
    }
}

impl<P: HealthProbe, R: Rng> ChaosDriver<P, R> {
    pub fn with_rng(probe: P, config: DriverConfig, rng: R) -> Self {
        Self { probe, config, rng }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// One pass: probe, recover if needed, sleep, crash, wait for recovery
    pub async fn cycle(&mut self) -> CycleReport {
        debug!(phase = %Phase::Probing, "Checking target health");
        let pre_crash_recovery_polls = if self.probe.healthcheck().await {
            None
        } else {
            warn!(
                phase = %Phase::Probing,
                "/health is currently unreachable, waiting for recovery before next crash"
            );
            Some(wait_for_recovery(&self.probe, self.config.poll_interval).await)
        };

        let crash_delay = self.config.schedule.next_delay(&mut self.rng);
        info!(
            phase = %Phase::Sleeping,
            delay_secs = crash_delay.as_secs(),
            "Healthy, next crash scheduled"
        );
        tokio::time::sleep(crash_delay).await;

        info!(phase = %Phase::Crashing, "Crashing instance via /crash");
        self.probe.crash().await;

        let recovery_polls = wait_for_recovery(&self.probe, self.config.poll_interval).await;

        CycleReport {
            pre_crash_recovery_polls,
            crash_delay,
            recovery_polls,
        }
    }

    /// Run cycles forever
    pub async fn run(&mut self) {
        let (min_secs, max_secs) = self.config.schedule.bounds();
        info!(
            min_delay_secs = min_secs,
            max_delay_secs = max_secs,
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "Chaos loop running"
        );

        let mut cycles: u64 = 0;
        loop {
            let report = self.cycle().await;
            cycles += 1;
            debug!(cycle = cycles, ?report, "Cycle complete");
        }
    }
}
