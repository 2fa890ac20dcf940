//! Summary file export.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::sweep::SweepState;

/// Run metadata written next to the counts file.
///
/// Key names differ from the legacy summary format:
/// `languages_targeted` is now `terms_targeted`, `languages_queried` is
/// `terms_resolved` and `failed_results` is `unresolved_terms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    /// Wall-clock duration as `HH:MM:SS`
    pub elapsed: String,
    pub terms_targeted: usize,
    pub terms_resolved: usize,
    pub failed_count: usize,
    /// Terms still failing after the retry budget, in worklist order
    pub unresolved_terms: Vec<String>,
    /// Terms counted from a response flagged `incomplete_results`
    pub incomplete_terms: Vec<String>,
    pub retries_remaining: u32,
    /// RFC 3339 start time
    pub started_at: String,
}

impl SweepSummary {
    pub fn from_state(state: &SweepState) -> Self {
        let unresolved_terms = state.unresolved_terms();
        Self {
            elapsed: format_elapsed(state.elapsed()),
            terms_targeted: state.worklist().len(),
            terms_resolved: state.accounted().len(),
            failed_count: unresolved_terms.len(),
            unresolved_terms,
            incomplete_terms: state.incomplete_terms(),
            retries_remaining: state.retries_remaining(),
            started_at: state.started_at().to_rfc3339(),
        }
    }
}

/// Formats a duration as `HH:MM:SS`; hours grow past 99 when needed.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Writes the summary file as pretty-printed JSON.
pub fn write_summary(summary: &SweepSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary file {}", path.display()))?;
    log::info!("Wrote run summary to {}", path.display());
    Ok(())
}
