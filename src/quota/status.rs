//! Quota status and the wait computed from it.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::HeaderMap;

use crate::config::{
    HEADER_RATELIMIT_RESET, HEADER_RETRY_AFTER, MAX_QUOTA_WAIT, MIN_QUOTA_WAIT, RESET_GRACE,
};

/// Requests left in the current window and when the window resets.
///
/// Never cached across batches: remaining quota decays with every request,
/// including requests made by other consumers of the same credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    pub remaining: u64,
    pub resets_at: DateTime<Utc>,
}

impl QuotaStatus {
    pub fn new(remaining: u64, resets_at: DateTime<Utc>) -> Self {
        Self {
            remaining,
            resets_at,
        }
    }

    /// Builds a status from the epoch-seconds reset value the API reports.
    ///
    /// Returns `None` if the timestamp is out of range.
    pub fn from_epoch(remaining: u64, reset_epoch_secs: i64) -> Option<Self> {
        DateTime::from_timestamp(reset_epoch_secs, 0).map(|resets_at| Self::new(remaining, resets_at))
    }

    /// Exhausted status for a rate-limited response.
    ///
    /// The reset is taken from `Retry-After` (delta seconds), then from
    /// `X-RateLimit-Reset`. With neither it is `now`, so the wait falls back
    /// to the policy minimum.
    pub fn rate_limited(headers: &HeaderMap, now: DateTime<Utc>) -> Self {
        let retry_after = headers
            .get(HEADER_RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(TimeDelta::try_seconds)
            .and_then(|delay| now.checked_add_signed(delay));
        let reset = headers
            .get(HEADER_RATELIMIT_RESET)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));
        Self::new(0, retry_after.or(reset).unwrap_or(now))
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining quota as a batch size bound.
    pub fn batch_limit(&self) -> usize {
        usize::try_from(self.remaining).unwrap_or(usize::MAX)
    }
}

/// How long to sleep when the quota is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Used when the reset time is already past (clock skew, instant reset)
    pub min_wait: Duration,
    /// Added to a positive time-until-reset
    pub reset_grace: Duration,
    /// Hard cap on any single wait
    pub max_wait: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            min_wait: MIN_QUOTA_WAIT,
            reset_grace: RESET_GRACE,
            max_wait: MAX_QUOTA_WAIT,
        }
    }
}

impl WaitPolicy {
    /// Wait until `status.resets_at`, measured from `now`.
    ///
    /// Always non-negative and never above `max_wait`. A reset in the past (or
    /// exactly now) yields `min_wait` so an exhausted quota cannot turn into a
    /// tight probe loop.
    pub fn wait_for(&self, status: &QuotaStatus, now: DateTime<Utc>) -> Duration {
        let wait = match (status.resets_at - now).to_std() {
            Ok(until_reset) if !until_reset.is_zero() => until_reset + self.reset_grace,
            _ => self.min_wait,
        };
        wait.min(self.max_wait)
    }
}
