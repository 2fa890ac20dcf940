//! Result files written after a sweep.
//!
//! - the counts file: JSON object term -> repository count, in worklist order
//! - the summary file: run metadata and the terms left unresolved

mod counts;
mod summary;

pub use counts::write_counts;
pub use summary::{format_elapsed, write_summary, SweepSummary};
