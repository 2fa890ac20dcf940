//! Per-attempt fetch outcome.

use crate::error_handling::FailureReason;

/// Result of one search attempt for one term.
///
/// Remote failures are data, not errors: the sweep folds them into its failure
/// set and retries them later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The search answered with a count. `incomplete` mirrors the API's
    /// `incomplete_results` flag (the search timed out server-side and the
    /// count may be low).
    Success { count: u64, incomplete: bool },
    /// The attempt produced no usable count.
    Failure { reason: FailureReason },
}

impl FetchOutcome {
    pub fn success(count: u64) -> Self {
        FetchOutcome::Success {
            count,
            incomplete: false,
        }
    }

    pub fn failure(reason: FailureReason) -> Self {
        FetchOutcome::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}
