//! Rate-limit-aware sweep over the worklist.
//!
//! The primary sweep walks `pending` in quota-sized batches; the retry sweep
//! then drains the failure set for a bounded number of passes. Both share the
//! same probe, dispatch, and merge steps:
//!
//! 1. probe the quota (sleep and re-probe while it is zero)
//! 2. take at most `remaining` terms
//! 3. fetch them concurrently and wait for all
//! 4. merge the outcomes into [`SweepState`] in one step

mod dispatch;
mod retry;
mod scheduler;
mod settings;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::dispatch_batch;
pub use retry::run_retry_sweep;
pub use scheduler::run_primary_sweep;
pub use settings::SweepSettings;
pub use state::SweepState;
