//! Worklist loading.
//!
//! Two input shapes are accepted:
//! - a linguist-style `languages.json` object; a key is a term when its value
//!   carries a `"color"` field (the languages that get a chart colour)
//! - a plain list with one term per line; blank lines and `#` comments are
//!   skipped
//!
//! Order is preserved in both cases since it determines batch membership.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error_handling::InputError;

/// Field whose presence marks a linguist entry as a term.
const COLOR_FIELD: &str = "color";

/// Reads and parses the terms file.
///
/// # Errors
///
/// Returns `InputError` if the file cannot be read, looks like JSON but does
/// not parse as an object, or yields no terms.
pub fn load_terms(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let terms = parse_terms(&content, path)?;
    log::info!("Loaded {} terms from {}", terms.len(), path.display());
    Ok(terms)
}

/// Parses terms from file content; `path` is only used in errors.
pub fn parse_terms(content: &str, path: &Path) -> Result<Vec<String>, InputError> {
    let terms = if content.trim_start().starts_with('{') {
        let languages: Map<String, Value> =
            serde_json::from_str(content).map_err(|source| InputError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        colored_languages(&languages)
    } else {
        plain_terms(content)
    };

    if terms.is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(terms)
}

fn colored_languages(languages: &Map<String, Value>) -> Vec<String> {
    languages
        .iter()
        .filter(|(_, entry)| entry.get(COLOR_FIELD).is_some())
        .map(|(name, _)| name.clone())
        .collect()
}

fn plain_terms(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
