//! Progress and statistics reporting used by the sweep and the run.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::{log_batch_progress, log_progress, SweepPhase};
pub use statistics::{print_failure_statistics, print_simple_summary};
