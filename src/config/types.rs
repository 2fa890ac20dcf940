//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    DEFAULT_API_BASE, DEFAULT_COUNTS_PATH, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_INPUT_PATH,
    DEFAULT_RETRY_BUDGET, DEFAULT_SUMMARY_PATH, DEFAULT_TOKEN_PATH, DEFAULT_USER_AGENT,
};

/// Retry passes above this are almost certainly a typo and would keep a
/// broken term hammering the search quota for hours.
const MAX_RETRY_BUDGET: u32 = 100;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Census configuration.
///
/// Every option has a default, so running the binary with no arguments sweeps
/// `./languages.json` using the credential in `./token` and writes the two
/// result files next to it.
///
/// # Examples
///
/// ```no_run
/// use language_census::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("terms.txt"),
///     retry_budget: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "language_census",
    version,
    about = "Counts GitHub repositories per language within the search API quota."
)]
pub struct Config {
    /// Terms file: linguist-style languages.json or one term per line
    #[arg(long, value_parser, default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// File holding the API token (GITHUB_TOKEN takes precedence when set)
    #[arg(long, value_parser, default_value = DEFAULT_TOKEN_PATH)]
    pub token_file: PathBuf,

    /// Output file for the term -> count mapping
    #[arg(long, value_parser, default_value = DEFAULT_COUNTS_PATH)]
    pub counts_path: PathBuf,

    /// Output file for the run summary
    #[arg(long, value_parser, default_value = DEFAULT_SUMMARY_PATH)]
    pub summary_path: PathBuf,

    /// Base URL of the search API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Retry passes over failed terms after the primary sweep
    #[arg(long, default_value_t = DEFAULT_RETRY_BUDGET)]
    pub retry_budget: u32,

    /// Per-search timeout in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            token_file: PathBuf::from(DEFAULT_TOKEN_PATH),
            counts_path: PathBuf::from(DEFAULT_COUNTS_PATH),
            summary_path: PathBuf::from(DEFAULT_SUMMARY_PATH),
            api_base: DEFAULT_API_BASE.to_string(),
            retry_budget: DEFAULT_RETRY_BUDGET,
            fetch_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration value that cannot be used for a sweep.
#[derive(Error, Debug)]
#[error("Invalid value for {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what would be accepted
    pub message: String,
}

impl Config {
    /// Per-search timeout as a `Duration`.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// API base with any trailing slash removed, ready for path joining.
    pub fn api_base_trimmed(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Checks values that clap cannot range-check on its own.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.fetch_timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "fetch_timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.retry_budget > MAX_RETRY_BUDGET {
            return Err(ConfigValidationError {
                field: "retry_budget",
                message: format!("must be at most {MAX_RETRY_BUDGET}"),
            });
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(ConfigValidationError {
                field: "api_base",
                message: format!("must start with http:// or https:// (got '{}')", self.api_base),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "user_agent",
                message: "must not be empty; the search API rejects anonymous agents".to_string(),
            });
        }
        Ok(())
    }
}
