//! Per-term search fetching.
//!
//! A fetcher issues exactly one request for one term and classifies the
//! result. It never touches sweep state and never returns an error: every
//! remote failure mode becomes a `FetchOutcome::Failure`.

mod classify;
mod outcome;
mod search;

pub use classify::{classify_response, is_rate_limited};
pub use outcome::FetchOutcome;
pub use search::{search_query, SearchFetcher};

/// Issues one query for one work item.
#[allow(async_fn_in_trait)]
pub trait ItemFetcher {
    async fn fetch(&self, item: &str) -> FetchOutcome;
}
