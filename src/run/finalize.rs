//! Census finalization.
//!
//! Writes the result files, prints statistics, and builds the report.

use anyhow::Result;

use crate::app::{log_progress, print_failure_statistics, print_simple_summary};
use crate::config::Config;
use crate::export::{write_counts, write_summary, SweepSummary};
use crate::sweep::SweepState;

use super::CensusReport;

/// Finalize a census run and produce the report.
///
/// # Errors
///
/// Returns an error if either result file cannot be written.
pub(super) fn finalize_census(config: &Config, state: &SweepState) -> Result<CensusReport> {
    log_progress(state);

    write_counts(state, &config.counts_path)?;
    let summary = SweepSummary::from_state(state);
    write_summary(&summary, &config.summary_path)?;

    print_failure_statistics(state.failure_stats());

    let elapsed_seconds = state.elapsed().as_secs_f64();
    print_simple_summary(
        summary.terms_targeted,
        summary.terms_resolved,
        summary.failed_count,
        elapsed_seconds,
    );

    Ok(CensusReport {
        terms_targeted: summary.terms_targeted,
        terms_resolved: summary.terms_resolved,
        failed: summary.failed_count,
        unresolved: summary.unresolved_terms,
        incomplete: summary.incomplete_terms,
        retries_remaining: summary.retries_remaining,
        elapsed_seconds,
        counts_path: config.counts_path.clone(),
        summary_path: config.summary_path.clone(),
    })
}
