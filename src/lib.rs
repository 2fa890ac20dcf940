//! language_census library: repository counts per language under a search quota
//!
//! This library sweeps a fixed list of terms (programming language names)
//! through the GitHub repository search API. The search quota is small and
//! resets on a rolling window, so the sweep:
//!
//! - probes the remaining quota before every batch and never dispatches more
//!   searches than it reports
//! - sleeps until the reported reset when the quota is exhausted
//! - collects malformed, rate-limited, and failed searches and retries them
//!   for a bounded number of passes
//!
//! # Example
//!
//! ```no_run
//! use language_census::{run_census, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("languages.json"),
//!     retry_budget: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_census(config).await?;
//! println!("Counted {} of {} terms, {} unresolved",
//!          report.terms_resolved, report.terms_targeted, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! The scheduling core is generic over [`QuotaProbe`] and [`ItemFetcher`], so it
//! can be driven by any quota source and any per-term fetch.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod quota;
mod run;
pub mod sweep;
pub mod worklist;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{FailureReason, TransportError};
pub use fetch::{FetchOutcome, ItemFetcher};
pub use quota::{QuotaProbe, QuotaStatus};
pub use run::{run_census, CensusReport};
pub use sweep::{run_primary_sweep, run_retry_sweep, SweepSettings, SweepState};
