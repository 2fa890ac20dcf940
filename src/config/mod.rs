//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, default paths, wait bounds)
//! - HTTP header name constants
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel};
