//! Counts file export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::sweep::SweepState;

/// Builds the term -> count object.
///
/// Keys follow the worklist order; unresolved terms are left out rather than
/// written as zero, so a consumer cannot mistake a failure for an empty
/// language.
pub(crate) fn counts_document(state: &SweepState) -> Map<String, Value> {
    state
        .counts_in_order()
        .into_iter()
        .map(|(term, count)| (term.to_string(), Value::from(count)))
        .collect()
}

/// Writes the counts file as pretty-printed JSON.
///
/// Returns the number of terms written.
pub fn write_counts(state: &SweepState, path: &Path) -> Result<usize> {
    let document = counts_document(state);
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize counts")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write counts file {}", path.display()))?;
    log::info!("Wrote {} counts to {}", document.len(), path.display());
    Ok(document.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureReason;
    use crate::fetch::FetchOutcome;

    fn sample_state() -> SweepState {
        let mut state = SweepState::new(
            vec!["Zig".to_string(), "Go".to_string(), "Ada".to_string()],
            0,
        );
        state.merge_batch(vec![
            ("Go".to_string(), FetchOutcome::success(120)),
            ("Ada".to_string(), FetchOutcome::failure(FailureReason::Other)),
            ("Zig".to_string(), FetchOutcome::success(5)),
        ]);
        state
    }

    #[test]
    fn test_counts_document_keeps_worklist_order() {
        let document = counts_document(&sample_state());
        let keys: Vec<&String> = document.keys().collect();
        assert_eq!(keys, vec!["Zig", "Go"]);
        assert_eq!(document["Go"], 120);
    }

    #[test]
    fn test_write_counts_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository_usage.json");

        let written = write_counts(&sample_state(), &path).unwrap();
        assert_eq!(written, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.find("\"Zig\"").unwrap() < content.find("\"Go\"").unwrap());
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, serde_json::json!({"Zig": 5, "Go": 120}));
    }

    #[test]
    fn test_write_counts_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("counts.json");
        let err = write_counts(&sample_state(), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write counts file"));
    }
}
