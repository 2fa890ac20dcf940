//! Configuration constants.
//!
//! This module defines the constants used throughout the census: remote
//! endpoints, default file locations, wait bounds and the quota-probe retry
//! strategy.

use std::time::Duration;

// Remote service
/// Default base URL of the search API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Repository search endpoint (relative to the API base)
pub const SEARCH_PATH: &str = "/search/repositories";
/// Rate-limit status endpoint (relative to the API base)
pub const RATE_LIMIT_PATH: &str = "/rate_limit";
/// Search qualifier each term is scoped to
pub const SEARCH_QUALIFIER: &str = "language";
/// Media type requested from the API
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github+json";

// Local files (same names the census has always used)
pub const DEFAULT_INPUT_PATH: &str = "./languages.json";
pub const DEFAULT_TOKEN_PATH: &str = "./token";
pub const DEFAULT_COUNTS_PATH: &str = "./repository_usage.json";
pub const DEFAULT_SUMMARY_PATH: &str = "./repository_usage_summary.json";
/// Environment variable that takes precedence over the token file
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

// Sweep defaults
/// Number of retry passes over failed terms after the primary sweep
pub const DEFAULT_RETRY_BUDGET: u32 = 3;
/// Per-fetch timeout in seconds; a hung search becomes a failed attempt
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// Quota waits
/// Wait used when the quota is exhausted but the reset time is already past
pub const MIN_QUOTA_WAIT: Duration = Duration::from_secs(2);
/// Added to every reset wait so we never wake a moment before the window rolls
pub const RESET_GRACE: Duration = Duration::from_secs(1);
/// Upper bound on a single quota wait (guards against bogus reset timestamps)
pub const MAX_QUOTA_WAIT: Duration = Duration::from_secs(60 * 60);

// Quota probe retry strategy
/// Initial delay in milliseconds before re-probing after a transport error
pub const PROBE_RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which the probe retry delay is multiplied on each attempt
pub const PROBE_RETRY_FACTOR: u64 = 2;
/// Maximum delay between probe retries in seconds
pub const PROBE_RETRY_MAX_DELAY_SECS: u64 = 10;
/// Number of probe retries before the quota endpoint is declared unreachable
pub const PROBE_RETRY_MAX_ATTEMPTS: usize = 4;

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_FORBIDDEN: u16 = 403;
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Default User-Agent header value (the search API rejects requests without one)
pub const DEFAULT_USER_AGENT: &str = concat!("language_census/", env!("CARGO_PKG_VERSION"));
