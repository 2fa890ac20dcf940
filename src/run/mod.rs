//! Census orchestration.
//!
//! Loads the credential and the worklist (fatal before any network traffic),
//! runs the primary and retry sweeps, then writes the result files.

mod finalize;

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::fetch::SearchFetcher;
use crate::initialization::{init_client, load_token};
use crate::quota::GithubQuotaProbe;
use crate::sweep::{run_primary_sweep, run_retry_sweep, SweepSettings, SweepState};
use crate::worklist::load_terms;

use finalize::finalize_census;

/// Results of a census run.
#[derive(Debug, Clone)]
pub struct CensusReport {
    /// Distinct terms in the worklist
    pub terms_targeted: usize,
    /// Terms with a count
    pub terms_resolved: usize,
    /// Terms still failing after the retry budget
    pub failed: usize,
    /// The failing terms, in worklist order
    pub unresolved: Vec<String>,
    /// Terms counted from incomplete search results
    pub incomplete: Vec<String>,
    /// Retry passes left unused
    pub retries_remaining: u32,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
    /// Path of the term -> count file
    pub counts_path: PathBuf,
    /// Path of the run summary file
    pub summary_path: PathBuf,
}

/// Runs a full census with the provided configuration.
///
/// Unresolved terms are not an error: they are listed in the report and in
/// the summary file.
///
/// # Errors
///
/// Returns an error if:
/// - the configuration is invalid
/// - the credential or the terms file cannot be read
/// - the quota endpoint stays unreachable
/// - a result file cannot be written
///
/// # Example
///
/// ```no_run
/// use language_census::{run_census, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     input: PathBuf::from("terms.txt"),
///     ..Default::default()
/// };
/// let report = run_census(config).await?;
/// println!("Counted {} of {} terms", report.terms_resolved, report.terms_targeted);
/// # Ok(())
/// # }
/// ```
pub async fn run_census(config: Config) -> Result<CensusReport> {
    config.validate().context("Invalid configuration")?;

    let token = load_token(&config.token_file).context("Failed to load API credential")?;
    let terms = load_terms(&config.input).context("Failed to load terms")?;

    let client = init_client(&config, &token).context("Failed to initialize HTTP client")?;
    let probe = GithubQuotaProbe::new(client.clone(), config.api_base_trimmed());
    let fetcher = SearchFetcher::new(client, config.api_base_trimmed());
    let settings = SweepSettings::from_config(&config);

    let mut state = SweepState::new(terms, config.retry_budget);
    info!(
        "Starting census of {} terms against {} (retry budget {})",
        state.worklist().len(),
        config.api_base_trimmed(),
        config.retry_budget
    );

    run_primary_sweep(&mut state, &probe, &fetcher, &settings)
        .await
        .context("Quota endpoint unreachable during primary sweep")?;
    run_retry_sweep(&mut state, &probe, &fetcher, &settings)
        .await
        .context("Quota endpoint unreachable during retry sweep")?;
    debug_assert!(
        state.is_settled(),
        "every term must end either counted or failed"
    );

    finalize_census(&config, &state)
}
