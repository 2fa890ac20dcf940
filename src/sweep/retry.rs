//! Retry sweep: bounded passes over terms whose last attempt failed.

use crate::app::{log_batch_progress, SweepPhase};
use crate::error_handling::TransportError;
use crate::fetch::ItemFetcher;
use crate::quota::QuotaProbe;

use super::dispatch::dispatch_batch;
use super::scheduler::wait_for_quota;
use super::{SweepSettings, SweepState};

/// Drains `state.failed` in quota-sized batches until it is empty or the
/// retry budget runs out.
///
/// A pass is spent only when a batch is actually dispatched; sleeping through
/// an exhausted quota costs nothing. Leftover failures are a normal outcome
/// and stay in `state.failed` for reporting.
///
/// # Errors
///
/// Returns `TransportError` only when the quota endpoint stays unreachable.
pub async fn run_retry_sweep<P, F>(
    state: &mut SweepState,
    probe: &P,
    fetcher: &F,
    settings: &SweepSettings,
) -> Result<(), TransportError>
where
    P: QuotaProbe,
    F: ItemFetcher,
{
    while state.retries_remaining() > 0 && state.has_failures() {
        let status = wait_for_quota(probe, settings).await?;

        state.consume_retry();
        let batch = state.take_retry_batch(status.batch_limit());
        log_batch_progress(SweepPhase::Retry, state, batch.len(), status.remaining);

        let results = dispatch_batch(fetcher, batch, settings.fetch_timeout).await;
        state.merge_batch(results);
    }

    if state.has_failures() {
        log::warn!(
            "Retry budget spent with {} unresolved term(s)",
            state.failed().len()
        );
    }
    Ok(())
}
