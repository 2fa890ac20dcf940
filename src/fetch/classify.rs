//! Classification of a search response into a `FetchOutcome`.
//!
//! Kept free of I/O so every status/header/body combination can be tested
//! without a server.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{
    HEADER_RATELIMIT_REMAINING, HEADER_RETRY_AFTER, HTTP_STATUS_FORBIDDEN,
    HTTP_STATUS_TOO_MANY_REQUESTS,
};
use crate::error_handling::FailureReason;

use super::FetchOutcome;

#[derive(Debug, Deserialize)]
struct SearchDocument {
    total_count: Option<u64>,
    #[serde(default)]
    incomplete_results: bool,
}

/// Returns true when the response signals an exhausted quota.
///
/// 429 always does. 403 does when `X-RateLimit-Remaining` is zero or a
/// `Retry-After` is present (secondary limit); a 403 with neither is an
/// authorization problem.
pub fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    match status.as_u16() {
        HTTP_STATUS_TOO_MANY_REQUESTS => true,
        HTTP_STATUS_FORBIDDEN => {
            headers.contains_key(HEADER_RETRY_AFTER)
                || headers
                    .get(HEADER_RATELIMIT_REMAINING)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v.trim() == "0")
        }
        _ => false,
    }
}

/// Classifies a completed search response.
///
/// - rate-limit signal (see [`is_rate_limited`]) -> `RateLimited`
/// - 5xx -> `Other`
/// - anything else is judged by its body: no `total_count` (or not JSON) ->
///   `Malformed`, otherwise `Success` carrying `incomplete_results`
pub fn classify_response(status: StatusCode, headers: &HeaderMap, body: &str) -> FetchOutcome {
    if is_rate_limited(status, headers) {
        return FetchOutcome::failure(FailureReason::RateLimited);
    }
    if status.is_server_error() {
        return FetchOutcome::failure(FailureReason::Other);
    }

    match serde_json::from_str::<SearchDocument>(body) {
        Ok(SearchDocument {
            total_count: Some(count),
            incomplete_results,
        }) => FetchOutcome::Success {
            count,
            incomplete: incomplete_results,
        },
        Ok(_) | Err(_) => FetchOutcome::failure(FailureReason::Malformed),
    }
}
