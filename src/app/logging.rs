//! Progress logging utilities.

use log::info;

use crate::sweep::SweepState;

/// Which loop dispatched a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPhase {
    Primary,
    Retry,
}

/// Logs one line per dispatched batch.
///
/// `quota` is the remaining quota reported by the probe that sized this batch.
pub fn log_batch_progress(phase: SweepPhase, state: &SweepState, batch_len: usize, quota: u64) {
    let total = state.worklist().len();
    let done = state.accounted().len();
    match phase {
        SweepPhase::Retry => info!(
            "[{}/{}] retry batch of {} dispatched, quota {}, {} retr{} left",
            done,
            total,
            batch_len,
            quota,
            state.retries_remaining(),
            if state.retries_remaining() == 1 { "y" } else { "ies" }
        ),
        SweepPhase::Primary => info!(
            "[{}/{}] batch of {} dispatched, quota {}, {} pending",
            done,
            total,
            batch_len,
            quota,
            state.pending_len()
        ),
    }
}

/// Logs overall throughput once the sweep has finished.
pub fn log_progress(state: &SweepState) {
    let elapsed_secs = state.elapsed().as_secs_f64();
    let attempts = state.progress();
    let rate = if elapsed_secs > 0.0 {
        attempts as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Issued {} searches in {:.2} seconds (~{:.2} searches/sec)",
        attempts, elapsed_secs, rate
    );
}
