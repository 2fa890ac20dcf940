//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `language_census` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file, e.g. `GITHUB_TOKEN`)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use language_census::initialization::init_logger_with;
use language_census::{run_census, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_census(config).await {
        Ok(report) => {
            println!(
                "✅ Counted {} of {} term{} ({} unresolved, {} retr{} unused) in {:.1}s",
                report.terms_resolved,
                report.terms_targeted,
                if report.terms_targeted == 1 { "" } else { "s" },
                report.failed,
                report.retries_remaining,
                if report.retries_remaining == 1 { "y" } else { "ies" },
                report.elapsed_seconds
            );
            println!("Counts saved in {}", report.counts_path.display());
            println!("Summary saved in {}", report.summary_path.display());
            if !report.incomplete.is_empty() {
                println!(
                    "Counted from incomplete results: {}",
                    report.incomplete.join(", ")
                );
            }
            if !report.unresolved.is_empty() {
                println!("Unresolved terms:");
                for term in &report.unresolved {
                    println!("  {}", term);
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("language_census error: {:#}", e);
            process::exit(1);
        }
    }
}
