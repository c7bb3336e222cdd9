// src/engine/state.rs
//! Process-wide state shared by all workers of one search invocation
//!
//! The winner slot, the attempt counter, the rejected-candidate buffer and
//! the current stage label live behind a single mutex. The stop flag is an
//! atomic mirror so workers can poll it per candidate without taking the
//! lock; it is only ever raised, never cleared.

use crate::engine::report::SearchResult;
use crate::types::Candidate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Cooperative cancellation handle
///
/// Cloned freely; cancelling any clone is observed by every run holding
/// another clone. This is how an external interrupt (Ctrl-C) reaches the
/// workers.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that every run observing this token stop
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct Inner {
    winner: Option<Candidate>,
    attempts: u64,
    rejected: Vec<Candidate>,
    stage: String,
}

/// Synchronized state for a single search invocation
pub struct SharedSearchState {
    inner: Mutex<Inner>,
    stop: AtomicBool,
    rejected_full: AtomicBool,
    rejected_capacity: usize,
    cancel: CancelToken,
    started: Instant,
}

impl SharedSearchState {
    /// Creates fresh state bounded to `rejected_capacity` remembered failures
    pub fn new(rejected_capacity: usize, cancel: CancelToken) -> Self {
        SharedSearchState {
            inner: Mutex::new(Inner {
                winner: None,
                attempts: 0,
                rejected: Vec::with_capacity(rejected_capacity.min(1024)),
                stage: String::new(),
            }),
            stop: AtomicBool::new(false),
            rejected_full: AtomicBool::new(rejected_capacity == 0),
            rejected_capacity,
            cancel,
            started: Instant::now(),
        }
    }

    // Workers never panic while holding the lock, but a poisoned guard still
    // carries consistent data.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Polled before every hash computation
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire) || self.cancel.is_cancelled()
    }

    /// Whether an external interrupt has been requested
    pub fn is_interrupted(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Attempts to record `candidate` as the winner
    ///
    /// Returns `true` only for the first claim of the run. Later claims are
    /// no-ops even when their candidate also matches, and so is any claim
    /// made after an interrupt: a run interrupted before it found anything
    /// stays `Aborted`.
    pub fn claim(&self, candidate: &str) -> bool {
        let mut inner = self.lock();
        if inner.winner.is_some() || self.cancel.is_cancelled() {
            return false;
        }
        inner.winner = Some(candidate.to_string());
        self.stop.store(true, Ordering::Release);
        true
    }

    /// Flushes a worker's local progress
    ///
    /// Adds `attempts` to the shared counter and moves as many of the
    /// worker's rejected candidates as still fit into the buffer. Once an
    /// interrupt has been observed without a winner the counter is frozen,
    /// so the reported total is the one at the moment of interruption.
    /// Claims are refused after an interrupt, so a frozen counter never
    /// thaws.
    pub fn record(&self, attempts: u64, rejected: &mut Vec<Candidate>) {
        let mut inner = self.lock();
        if self.cancel.is_cancelled() && inner.winner.is_none() {
            rejected.clear();
            return;
        }
        inner.attempts += attempts;

        let room = self.rejected_capacity.saturating_sub(inner.rejected.len());
        if room > 0 {
            let take = room.min(rejected.len());
            inner.rejected.extend(rejected.drain(..take));
        }
        if inner.rejected.len() >= self.rejected_capacity {
            self.rejected_full.store(true, Ordering::Relaxed);
        }
        rejected.clear();
    }

    /// Whether workers should still collect rejected candidates
    pub fn wants_rejected(&self) -> bool {
        !self.rejected_full.load(Ordering::Relaxed)
    }

    /// The winning candidate, if any
    pub fn winner(&self) -> Option<Candidate> {
        self.lock().winner.clone()
    }

    /// Cumulative flushed attempt count
    pub fn attempts(&self) -> u64 {
        self.lock().attempts
    }

    /// Snapshot of the rejected-candidate buffer
    pub fn rejected(&self) -> Vec<Candidate> {
        self.lock().rejected.clone()
    }

    /// Number of buffered rejected candidates
    pub fn rejected_len(&self) -> usize {
        self.lock().rejected.len()
    }

    /// Labels the stage currently being run, for progress reporting
    pub fn set_stage(&self, name: &str) {
        let mut inner = self.lock();
        inner.stage.clear();
        inner.stage.push_str(name);
    }

    /// The current stage label
    pub fn stage(&self) -> String {
        self.lock().stage.clone()
    }

    /// Time since this state was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Terminal result implied by the current state
    ///
    /// A claimed winner always takes precedence over an interrupt.
    pub fn outcome(&self) -> SearchResult {
        match self.winner() {
            Some(candidate) => SearchResult::Found(candidate),
            None if self.is_interrupted() => SearchResult::Aborted,
            None => SearchResult::NotFound,
        }
    }
}
