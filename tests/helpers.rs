// Shared test helpers for census integration tests.
//
// Builds input/credential files and a Config pointed at a mock API server.

use std::io::Write;
use std::path::Path;

use language_census::{Config, LogFormat, LogLevel};
use tempfile::{NamedTempFile, TempDir};

/// Writes `content` to a fresh temporary file.
#[allow(dead_code)] // Used by other test files
pub fn write_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// A linguist-style languages file with one prose entry that must be skipped.
#[allow(dead_code)] // Used by other test files
pub fn languages_json(colored: &[&str]) -> String {
    let mut entries: Vec<String> = colored
        .iter()
        .map(|name| format!("\"{}\": {{\"type\": \"programming\", \"color\": \"#123456\"}}", name))
        .collect();
    entries.insert(1.min(entries.len()), "\"Markdown\": {\"type\": \"prose\"}".to_string());
    format!("{{{}}}", entries.join(", "))
}

/// Config for a census against `api_base`, writing results into `out_dir`.
#[allow(dead_code)] // Used by other test files
pub fn create_test_config(api_base: &str, input: &Path, token: &Path, out_dir: &TempDir) -> Config {
    Config {
        input: input.to_path_buf(),
        token_file: token.to_path_buf(),
        counts_path: out_dir.path().join("repository_usage.json"),
        summary_path: out_dir.path().join("repository_usage_summary.json"),
        api_base: api_base.to_string(),
        retry_budget: 3,
        fetch_timeout_seconds: 5,
        user_agent: "language_census_test/1.0".to_string(),
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
    }
}
