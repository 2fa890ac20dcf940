//! Tuning knobs for a sweep.

use std::time::Duration;

use crate::config::{Config, PROBE_RETRY_INITIAL_DELAY_MS, PROBE_RETRY_MAX_ATTEMPTS};
use crate::quota::WaitPolicy;

/// Timing parameters shared by the scheduler and the retry coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSettings {
    /// Upper bound on a single fetch; a hang becomes `Failure{Other}`
    pub fetch_timeout: Duration,
    /// Sleep computation for an exhausted quota
    pub wait_policy: WaitPolicy,
    /// First delay between failed quota probes
    pub probe_retry_initial_delay_ms: u64,
    /// Re-probes after the first failure before the sweep gives up
    pub probe_retry_attempts: usize,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            fetch_timeout: Config::default().fetch_timeout(),
            wait_policy: WaitPolicy::default(),
            probe_retry_initial_delay_ms: PROBE_RETRY_INITIAL_DELAY_MS,
            probe_retry_attempts: PROBE_RETRY_MAX_ATTEMPTS,
        }
    }
}

impl SweepSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fetch_timeout: config.fetch_timeout(),
            ..Self::default()
        }
    }
}
