//! HTTP client initialization.
//!
//! One client is shared by the quota probe and the search fetcher so both
//! reuse the same connection pool and credential headers.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::ClientBuilder;

use crate::config::{Config, ACCEPT_MEDIA_TYPE};
use crate::error_handling::InitializationError;

/// Initializes the authenticated HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - `Authorization: token <token>` on every request
/// - The search API's JSON media type as `Accept`
/// - User-Agent header from the configuration
/// - Request timeout from the configuration
///
/// # Errors
///
/// Returns `InitializationError::CredentialError` if the token cannot be used
/// as a header value, or `HttpClientError` if client creation fails.
pub fn init_client(config: &Config, token: &str) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut auth = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
        InitializationError::CredentialError(
            "token contains characters that are not valid in an HTTP header".to_string(),
        )
    })?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));

    let client = ClientBuilder::new()
        .default_headers(headers)
        .timeout(config.fetch_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
