//! Error type definitions.
//!
//! This module defines the fatal error types (initialization, transport, input)
//! and the per-term failure reasons that are carried as data.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The API credential could not be read or is unusable.
    #[error("Credential error: {0}")]
    CredentialError(String),
}

/// The quota probe could not produce a status.
///
/// Fatal for the probe attempt only; the scheduler re-probes with backoff
/// before giving up on the whole sweep.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request never completed (DNS, connect, TLS, timeout).
    #[error("Quota probe request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The endpoint answered with a non-success status that is not a rate-limit signal.
    #[error("Quota probe returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// The body was not the expected rate-limit document.
    #[error("Quota probe response could not be decoded: {0}")]
    Decode(String),
}

/// Errors loading the worklist.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input file could not be read.
    #[error("Failed to read input file {path}: {source}")]
    Read {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The input looked like JSON but did not parse.
    #[error("Failed to parse input file {path} as JSON: {source}")]
    Parse {
        /// Path of the input file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The input contained no terms to query.
    #[error("Input file {path} contains no terms to query")]
    Empty {
        /// Path of the input file
        path: PathBuf,
    },
}

/// Why a single search attempt did not produce a count.
///
/// Failures are data, not errors: they are folded into the sweep's failure
/// set and retried, never propagated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The service reported the quota as exhausted for this request.
    RateLimited,
    /// The response lacked `total_count` or was not JSON.
    Malformed,
    /// Anything else: timeout, transport failure, server error.
    Other,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::RateLimited => "Rate limited",
            FailureReason::Malformed => "Malformed response",
            FailureReason::Other => "Other failure",
        }
    }
}
