//! HTTP header name constants.
//!
//! Rate-limit headers carried on every search API response. Lowercase so they
//! are valid `HeaderName`s as written.

/// Requests left in the current rate-limit window
pub const HEADER_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// Epoch seconds at which the current window resets
pub const HEADER_RATELIMIT_RESET: &str = "x-ratelimit-reset";
/// Delta seconds to wait, sent with secondary rate limits
pub const HEADER_RETRY_AFTER: &str = "retry-after";
