//! Concurrent fan-out of one batch.

use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::error_handling::FailureReason;
use crate::fetch::{FetchOutcome, ItemFetcher};

/// Fetches every term of `batch` concurrently and waits for all of them.
///
/// No short-circuit: a failed or timed-out fetch does not cancel its
/// siblings. Results come back in completion order and are not applied to
/// any state here.
pub async fn dispatch_batch<F: ItemFetcher>(
    fetcher: &F,
    batch: Vec<String>,
    fetch_timeout: Duration,
) -> Vec<(String, FetchOutcome)> {
    let mut in_flight = FuturesUnordered::new();
    for term in batch {
        in_flight.push(async move {
            let outcome = match tokio::time::timeout(fetch_timeout, fetcher.fetch(&term)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    log::debug!("Search for {} timed out after {:?}", term, fetch_timeout);
                    FetchOutcome::failure(FailureReason::Other)
                }
            };
            (term, outcome)
        });
    }
    in_flight.collect().await
}
