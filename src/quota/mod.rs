//! Remote quota probing.
//!
//! The sweep asks for the current quota immediately before every batch and
//! sizes the batch from the answer. A probe is stateless: it reports what the
//! service says right now and nothing else.

mod probe;
mod status;

pub use probe::GithubQuotaProbe;
pub use status::{QuotaStatus, WaitPolicy};

use crate::error_handling::TransportError;

/// Source of the current request quota.
#[allow(async_fn_in_trait)]
pub trait QuotaProbe {
    /// Fetches the remaining quota and the time it resets.
    async fn probe(&self) -> Result<QuotaStatus, TransportError>;
}
