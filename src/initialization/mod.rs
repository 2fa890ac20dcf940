//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a census:
//! - Logger (plain or JSON)
//! - API credential
//! - Authenticated HTTP client
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod credentials;
mod logger;

// Re-export public API
pub use client::init_client;
pub use credentials::load_token;
pub use logger::init_logger_with;
