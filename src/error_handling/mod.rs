//! Error handling and failure statistics.
//!
//! This module provides:
//! - Fatal error types (initialization, quota transport, input)
//! - The per-term `FailureReason` carried as data through the sweep
//! - Failure statistics by reason
//! - The quota-probe retry strategy
//!
//! Per-term failures never escalate: only an unreachable quota endpoint or
//! unreadable local configuration stops a census.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{describe_reqwest_error, get_probe_retry_strategy};
pub use stats::FailureStats;
pub use types::{FailureReason, InitializationError, InputError, TransportError};
