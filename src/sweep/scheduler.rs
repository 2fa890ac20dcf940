//! Primary sweep: quota-sized batches over the pending worklist.

use chrono::Utc;
use tokio_retry::Retry;

use crate::app::{log_batch_progress, SweepPhase};
use crate::error_handling::{get_probe_retry_strategy, TransportError};
use crate::fetch::ItemFetcher;
use crate::quota::{QuotaProbe, QuotaStatus};

use super::dispatch::dispatch_batch;
use super::{SweepSettings, SweepState};

/// Probes the quota, re-probing with exponential backoff on transport errors.
///
/// Returns the last error once the retry strategy is exhausted.
pub(crate) async fn probe_with_retry<P: QuotaProbe>(
    probe: &P,
    settings: &SweepSettings,
) -> Result<QuotaStatus, TransportError> {
    let strategy = get_probe_retry_strategy(
        settings.probe_retry_initial_delay_ms,
        settings.probe_retry_attempts,
    );
    Retry::spawn(strategy, move || async move {
        probe.probe().await.map_err(|e| {
            log::warn!("Quota probe failed: {}", e);
            e
        })
    })
    .await
}

/// Probes until the quota is non-zero, sleeping through exhausted windows.
pub(crate) async fn wait_for_quota<P: QuotaProbe>(
    probe: &P,
    settings: &SweepSettings,
) -> Result<QuotaStatus, TransportError> {
    loop {
        let status = probe_with_retry(probe, settings).await?;
        if !status.is_exhausted() {
            return Ok(status);
        }
        let wait = settings.wait_policy.wait_for(&status, Utc::now());
        log::info!(
            "Search quota exhausted, sleeping {:.1}s until reset at {}",
            wait.as_secs_f64(),
            status.resets_at.format("%H:%M:%S")
        );
        tokio::time::sleep(wait).await;
    }
}

/// Runs batches until `pending` is empty.
///
/// Each batch is sized by the probe that immediately precedes it and fully
/// joined before the next probe. Failed terms accumulate in `state.failed`
/// for the retry sweep; their number never stops this loop.
///
/// # Errors
///
/// Returns `TransportError` only when the quota endpoint stays unreachable
/// through the probe retry strategy.
pub async fn run_primary_sweep<P, F>(
    state: &mut SweepState,
    probe: &P,
    fetcher: &F,
    settings: &SweepSettings,
) -> Result<(), TransportError>
where
    P: QuotaProbe,
    F: ItemFetcher,
{
    loop {
        state.prune_pending();
        if !state.has_pending() {
            break;
        }

        let status = wait_for_quota(probe, settings).await?;
        let batch = state.next_batch(status.batch_limit());
        if batch.is_empty() {
            continue;
        }

        log_batch_progress(SweepPhase::Primary, state, batch.len(), status.remaining);
        let results = dispatch_batch(fetcher, batch, settings.fetch_timeout).await;
        state.merge_batch(results);
    }

    log::info!(
        "Primary sweep done: {} counted, {} failed",
        state.accounted().len(),
        state.failed().len()
    );
    Ok(())
}
