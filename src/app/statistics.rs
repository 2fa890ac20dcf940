//! Failure statistics and the final one-line summary.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureReason, FailureStats};

/// Prints failed attempts by reason.
///
/// Counts are per attempt, so a term that failed in the primary sweep and
/// succeeded on retry still shows up here.
pub fn print_failure_statistics(stats: &FailureStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }

    info!("Failed attempts ({} total):", total);
    for reason in FailureReason::iter() {
        let count = stats.get_count(reason);
        if count > 0 {
            info!("   {}: {}", reason.as_str(), count);
        }
    }
}

/// Prints a one-line summary of the run.
pub fn print_simple_summary(targeted: usize, resolved: usize, unresolved: usize, elapsed_seconds: f64) {
    info!(
        "✅ Counted {} of {} term{} ({} unresolved) in {:.1}s",
        resolved,
        targeted,
        if targeted == 1 { "" } else { "s" },
        unresolved,
        elapsed_seconds
    );
}
