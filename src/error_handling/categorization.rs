//! Error categorization and retry strategy.
//!
//! This module provides the quota-probe retry strategy and a short label for
//! transport errors used in failure logs.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

/// Creates the exponential backoff strategy for re-probing the quota endpoint.
///
/// Delays start at `initial_delay_ms`, grow by `PROBE_RETRY_FACTOR` and are
/// capped at `PROBE_RETRY_MAX_DELAY_SECS`; at most `max_retries` delays are
/// yielded, after which the probe error is returned.
///
/// `ExponentialBackoff` yields `factor * base^n` for n = 1, 2, ..., so the
/// growth factor is the base and the multiplier is scaled down by one step.
pub fn get_probe_retry_strategy(
    initial_delay_ms: u64,
    max_retries: usize,
) -> impl Iterator<Item = Duration> {
    let growth = crate::config::PROBE_RETRY_FACTOR;
    ExponentialBackoff::from_millis(growth)
        .factor((initial_delay_ms / growth).max(1))
        .max_delay(Duration::from_secs(
            crate::config::PROBE_RETRY_MAX_DELAY_SECS,
        ))
        .take(max_retries)
}

/// Short label for a `reqwest::Error`, used when logging failed attempts.
pub fn describe_reqwest_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect error"
    } else if error.is_decode() {
        "decode error"
    } else if error.is_body() {
        "body error"
    } else if error.is_request() {
        "request error"
    } else if error.is_builder() {
        "request builder error"
    } else {
        "transport error"
    }
}
