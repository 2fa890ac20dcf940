//! Failure statistics tracking.
//!
//! Counts every failed attempt by reason across the primary and retry sweeps.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::FailureReason;

/// Per-reason failure counters.
///
/// Every `FailureReason` is initialized to zero on creation. Counts are per
/// attempt, so a term that fails twice before succeeding contributes two.
#[derive(Debug, Clone)]
pub struct FailureStats {
    counts: HashMap<FailureReason, usize>,
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureStats {
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for reason in FailureReason::iter() {
            counts.insert(reason, 0);
        }
        FailureStats { counts }
    }

    pub fn increment(&mut self, reason: FailureReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn get_count(&self, reason: FailureReason) -> usize {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
