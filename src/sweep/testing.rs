//! Scripted probe and fetcher for scheduler tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use crate::error_handling::TransportError;
use crate::fetch::{FetchOutcome, ItemFetcher};
use crate::quota::{QuotaProbe, QuotaStatus, WaitPolicy};

use super::SweepSettings;

/// Settings with millisecond waits so exhausted-quota paths run instantly.
pub(crate) fn fast_settings() -> SweepSettings {
    SweepSettings {
        fetch_timeout: Duration::from_secs(5),
        wait_policy: WaitPolicy {
            min_wait: Duration::from_millis(1),
            reset_grace: Duration::ZERO,
            max_wait: Duration::from_millis(5),
        },
        probe_retry_initial_delay_ms: 1,
        probe_retry_attempts: 2,
    }
}

pub(crate) fn terms(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Probe and fetch calls in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Probe(u64),
    Fetch(String),
}

pub(crate) type EventLog = Arc<Mutex<Vec<Event>>>;

/// Number of fetches issued after each successful probe.
pub(crate) fn batches_after_probes(log: &EventLog) -> Vec<(u64, usize)> {
    let mut batches: Vec<(u64, usize)> = Vec::new();
    for event in log.lock().unwrap().iter() {
        match event {
            Event::Probe(remaining) => batches.push((*remaining, 0)),
            Event::Fetch(_) => {
                if let Some(last) = batches.last_mut() {
                    last.1 += 1;
                }
            }
        }
    }
    batches
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ProbeStep {
    Quota(u64),
    Fail,
}

/// Returns scripted quotas in order; the last step repeats forever.
pub(crate) struct ScriptedProbe {
    steps: Mutex<VecDeque<ProbeStep>>,
    calls: AtomicUsize,
    log: Option<EventLog>,
}

impl ScriptedProbe {
    pub(crate) fn new(steps: Vec<ProbeStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
            log: None,
        }
    }

    pub(crate) fn quotas(quotas: &[u64]) -> Self {
        Self::new(quotas.iter().map(|&q| ProbeStep::Quota(q)).collect())
    }

    pub(crate) fn unlimited() -> Self {
        Self::quotas(&[u64::MAX])
    }

    pub(crate) fn logging_to(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuotaProbe for ScriptedProbe {
    async fn probe(&self) -> Result<QuotaStatus, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let mut steps = self.steps.lock().unwrap();
            if steps.len() > 1 {
                steps.pop_front()
            } else {
                steps.front().copied()
            }
        };
        match step.unwrap_or(ProbeStep::Quota(u64::MAX)) {
            ProbeStep::Quota(remaining) => {
                if let Some(log) = &self.log {
                    log.lock().unwrap().push(Event::Probe(remaining));
                }
                // Reset already past: waits fall back to the policy minimum
                Ok(QuotaStatus::new(remaining, Utc::now() - TimeDelta::seconds(1)))
            }
            ProbeStep::Fail => Err(TransportError::Decode("scripted probe failure".to_string())),
        }
    }
}

/// Returns scripted outcomes per term; the last outcome repeats forever and
/// unscripted terms succeed with a count of zero.
pub(crate) struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<FetchOutcome>>>,
    hanging: HashSet<String>,
    queried: Mutex<Vec<String>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    log: Option<EventLog>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            hanging: HashSet::new(),
            queried: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            log: None,
        }
    }

    pub(crate) fn with(self, term: &str, outcomes: Vec<FetchOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(term.to_string(), outcomes.into());
        self
    }

    /// The term never answers; only the per-fetch timeout ends it.
    pub(crate) fn hanging(mut self, term: &str) -> Self {
        self.hanging.insert(term.to_string());
        self
    }

    pub(crate) fn logging_to(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }

    pub(crate) fn times_queried(&self, term: &str) -> usize {
        self.queried.lock().unwrap().iter().filter(|t| *t == term).count()
    }
}

impl ItemFetcher for ScriptedFetcher {
    async fn fetch(&self, item: &str) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(item.to_string());
        if let Some(log) = &self.log {
            log.lock().unwrap().push(Event::Fetch(item.to_string()));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Let the rest of the batch start before this one finishes
        tokio::task::yield_now().await;

        if self.hanging.contains(item) {
            std::future::pending::<()>().await;
        }

        let outcome = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(item) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().copied(),
                None => None,
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome.unwrap_or(FetchOutcome::success(0))
    }
}
