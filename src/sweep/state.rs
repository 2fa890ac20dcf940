//! Sweep state: what is left to query, what has been counted, what failed.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ops::Bound::{Excluded, Unbounded};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::error_handling::{FailureReason, FailureStats};
use crate::fetch::FetchOutcome;

/// All mutable state of one census sweep.
///
/// Only the scheduler and the retry coordinator mutate it, and only between
/// batches: outcomes of a batch are collected first and applied in one
/// [`merge_batch`](SweepState::merge_batch) call.
///
/// Invariants, outside of an in-flight batch:
/// - no term is both in `accounted` and `failed`
/// - an accounted count is never overwritten
/// - once `pending` is drained and the retry sweep has finished, every
///   worklist term is either accounted or failed
#[derive(Debug)]
pub struct SweepState {
    worklist: Vec<String>,
    pending: VecDeque<String>,
    accounted: HashMap<String, u64>,
    failed: BTreeSet<String>,
    incomplete_flags: BTreeSet<String>,
    failure_reasons: BTreeMap<String, FailureReason>,
    retries_remaining: u32,
    retry_cursor: Option<String>,
    progress: usize,
    failure_stats: FailureStats,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl SweepState {
    /// Creates the state for a sweep over `terms`, in the given order.
    ///
    /// Duplicate terms stay in `pending` (they are skipped once the first copy
    /// is accounted) but appear once in the worklist used for reporting.
    pub fn new(terms: Vec<String>, retry_budget: u32) -> Self {
        let worklist = {
            let mut seen = HashSet::new();
            terms
                .iter()
                .filter(|t| seen.insert(t.as_str()))
                .cloned()
                .collect()
        };

        Self {
            worklist,
            pending: terms.into(),
            accounted: HashMap::new(),
            failed: BTreeSet::new(),
            incomplete_flags: BTreeSet::new(),
            failure_reasons: BTreeMap::new(),
            retries_remaining: retry_budget,
            retry_cursor: None,
            progress: 0,
            failure_stats: FailureStats::new(),
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Drops pending terms that already have a count.
    pub(crate) fn prune_pending(&mut self) {
        let accounted = &self.accounted;
        self.pending.retain(|term| !accounted.contains_key(term));
    }

    /// Takes up to `limit` unaccounted, distinct terms off the front of `pending`.
    ///
    /// Accounted terms and repeats within the batch are dropped without
    /// counting toward `limit`, so they never consume quota.
    pub(crate) fn next_batch(&mut self, limit: usize) -> Vec<String> {
        let mut batch: Vec<String> = Vec::with_capacity(limit.min(self.pending.len()));
        while batch.len() < limit {
            let Some(term) = self.pending.pop_front() else {
                break;
            };
            if self.accounted.contains_key(&term) {
                log::debug!("Skipping {}: already counted", term);
                continue;
            }
            if batch.contains(&term) {
                continue;
            }
            batch.push(term);
        }
        batch
    }

    /// Removes up to `limit` terms from the failure set.
    ///
    /// Terms are taken in sorted order, continuing after the last term of the
    /// previous retry batch and wrapping around, so a small quota cycles
    /// through every failed term instead of retrying the same few.
    pub(crate) fn take_retry_batch(&mut self, limit: usize) -> Vec<String> {
        let mut batch: Vec<String> = match &self.retry_cursor {
            Some(cursor) => self
                .failed
                .range::<String, _>((Excluded(cursor), Unbounded))
                .take(limit)
                .cloned()
                .collect(),
            None => self.failed.iter().take(limit).cloned().collect(),
        };
        for term in &self.failed {
            if batch.len() >= limit {
                break;
            }
            if !batch.contains(term) {
                batch.push(term.clone());
            }
        }

        for term in &batch {
            self.failed.remove(term);
        }
        if let Some(last) = batch.last() {
            self.retry_cursor = Some(last.clone());
        }
        batch
    }

    /// Spends one retry pass. Saturates at zero.
    pub(crate) fn consume_retry(&mut self) {
        self.retries_remaining = self.retries_remaining.saturating_sub(1);
    }

    /// Applies the outcomes of one fully-joined batch.
    pub fn merge_batch(&mut self, results: Vec<(String, FetchOutcome)>) {
        self.progress += results.len();

        for (term, outcome) in results {
            match outcome {
                FetchOutcome::Success { count, incomplete } => {
                    self.failed.remove(&term);
                    self.failure_reasons.remove(&term);
                    match self.accounted.entry(term) {
                        Entry::Vacant(slot) => {
                            if incomplete {
                                log::warn!(
                                    "{}: {} (search reported incomplete results)",
                                    slot.key(),
                                    count
                                );
                                self.incomplete_flags.insert(slot.key().clone());
                            } else {
                                log::debug!("{}: {}", slot.key(), count);
                                self.incomplete_flags.remove(slot.key());
                            }
                            slot.insert(count);
                        }
                        Entry::Occupied(slot) => {
                            log::debug!("{} already counted, keeping {}", slot.key(), slot.get());
                        }
                    }
                }
                FetchOutcome::Failure { reason } => {
                    self.failure_stats.increment(reason);
                    if self.accounted.contains_key(&term) {
                        continue;
                    }
                    log::warn!("{}: {}", term, reason);
                    self.failure_reasons.insert(term.clone(), reason);
                    self.failed.insert(term);
                }
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Distinct terms in input order.
    pub fn worklist(&self) -> &[String] {
        &self.worklist
    }

    pub fn accounted(&self) -> &HashMap<String, u64> {
        &self.accounted
    }

    pub fn count_for(&self, term: &str) -> Option<u64> {
        self.accounted.get(term).copied()
    }

    pub fn failed(&self) -> &BTreeSet<String> {
        &self.failed
    }

    pub fn incomplete_flags(&self) -> &BTreeSet<String> {
        &self.incomplete_flags
    }

    /// Reason of the most recent failed attempt for a term still in `failed`.
    pub fn failure_reason(&self, term: &str) -> Option<FailureReason> {
        self.failure_reasons.get(term).copied()
    }

    pub fn retries_remaining(&self) -> u32 {
        self.retries_remaining
    }

    /// Fetch attempts issued so far, across both sweeps.
    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn failure_stats(&self) -> &FailureStats {
        &self.failure_stats
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Accounted counts in worklist order.
    pub fn counts_in_order(&self) -> Vec<(&str, u64)> {
        self.worklist
            .iter()
            .filter_map(|term| self.accounted.get(term).map(|&c| (term.as_str(), c)))
            .collect()
    }

    /// Failed terms in worklist order.
    pub fn unresolved_terms(&self) -> Vec<String> {
        self.worklist
            .iter()
            .filter(|term| self.failed.contains(*term))
            .cloned()
            .collect()
    }

    /// Incomplete-flagged terms in worklist order.
    pub fn incomplete_terms(&self) -> Vec<String> {
        self.worklist
            .iter()
            .filter(|term| self.incomplete_flags.contains(*term))
            .cloned()
            .collect()
    }

    /// True when every worklist term is in exactly one of accounted / failed.
    pub fn is_settled(&self) -> bool {
        self.worklist.iter().all(|term| {
            self.accounted.contains_key(term) != self.failed.contains(term)
        })
    }
}
