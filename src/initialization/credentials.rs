//! API credential loading.

use std::fs;
use std::path::Path;

use crate::config::TOKEN_ENV_VAR;
use crate::error_handling::InitializationError;

/// Loads the API token.
///
/// `GITHUB_TOKEN` wins when it is set and non-empty; otherwise the token is the
/// trimmed content of `path`. A missing file or an empty token is an error,
/// since every search request needs the credential.
pub fn load_token(path: &Path) -> Result<String, InitializationError> {
    if let Ok(value) = std::env::var(TOKEN_ENV_VAR) {
        let value = value.trim();
        if !value.is_empty() {
            log::debug!("Using API token from {}", TOKEN_ENV_VAR);
            return Ok(value.to_string());
        }
    }
    read_token_file(path)
}

fn read_token_file(path: &Path) -> Result<String, InitializationError> {
    let content = fs::read_to_string(path).map_err(|e| {
        InitializationError::CredentialError(format!(
            "failed to read token file {}: {} (or set {})",
            path.display(),
            e,
            TOKEN_ENV_VAR
        ))
    })?;

    let token = content.trim();
    if token.is_empty() {
        return Err(InitializationError::CredentialError(format!(
            "token file {} is empty",
            path.display()
        )));
    }
    log::debug!("Using API token from {}", path.display());
    Ok(token.to_string())
}
