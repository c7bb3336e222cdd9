// src/engine/worker.rs
//! Per-thread candidate evaluation
//!
//! A worker hashes its chunk in order, polling the stop signal before every
//! hash. Progress is kept locally and flushed to the shared state every
//! `flush_interval` comparisons, so mid-run counters lag slightly behind
//! the true total but are exact once the worker is dropped.

use crate::engine::algorithm::Algorithm;
use crate::engine::state::SharedSearchState;
use crate::types::{Candidate, Digest};

/// Everything a worker borrows from its run
#[derive(Clone, Copy)]
pub struct ScanContext<'a> {
    /// Digest oracle
    pub algorithm: &'a dyn Algorithm,
    /// Target digest
    pub target: &'a Digest,
    /// Shared state of the run
    pub state: &'a SharedSearchState,
    /// Comparisons between counter flushes
    pub flush_interval: u64,
}

/// How a chunk scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every candidate in the chunk was evaluated
    Exhausted,
    /// This worker found a match; `won` tells whether its claim succeeded
    Matched {
        /// Whether this worker's claim became the run's winner
        won: bool,
    },
    /// The stop signal was observed before the chunk was finished
    Stopped,
}

/// Evaluates chunks against the target
pub struct Worker<'a> {
    id: usize,
    ctx: ScanContext<'a>,
    pending: u64,
    rejected: Vec<Candidate>,
}

impl<'a> Worker<'a> {
    /// Creates a worker with an empty local counter
    pub fn new(id: usize, ctx: ScanContext<'a>) -> Self {
        Worker {
            id,
            ctx,
            pending: 0,
            rejected: Vec::new(),
        }
    }

    /// Scans one chunk in order
    ///
    /// Candidates the oracle cannot hash are skipped and not counted.
    pub fn scan(&mut self, chunk: Vec<Candidate>) -> ScanOutcome {
        let target = self.ctx.target.as_bytes();

        for candidate in chunk {
            if self.ctx.state.should_stop() {
                return ScanOutcome::Stopped;
            }

            let hash = match self.ctx.algorithm.hash(candidate.as_bytes()) {
                Ok(hash) => hash,
                Err(e) => {
                    log::debug!("Worker {}: skipping candidate: {}", self.id, e);
                    continue;
                }
            };
            self.pending += 1;

            if hash.as_slice() == target {
                let won = self.ctx.state.claim(&candidate);
                if won {
                    log::info!("Worker {} claimed a match", self.id);
                } else {
                    log::debug!("Worker {} matched after the run was already stopped", self.id);
                }
                self.flush();
                return ScanOutcome::Matched { won };
            }

            if self.ctx.state.wants_rejected() {
                self.rejected.push(candidate);
            }
            if self.pending >= self.ctx.flush_interval {
                self.flush();
            }
        }

        ScanOutcome::Exhausted
    }

    /// Pushes local progress into the shared state
    pub fn flush(&mut self) {
        if self.pending > 0 || !self.rejected.is_empty() {
            self.ctx.state.record(self.pending, &mut self.rejected);
            self.pending = 0;
        }
    }
}

impl Drop for Worker<'_> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::algorithm::Md5Algo;
    use crate::engine::state::CancelToken;
    use crate::types::AlgorithmType;
    use crate::utils::error::AuditError;

    fn words(items: &[&str]) -> Vec<Candidate> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn target(word: &str) -> Digest {
        Digest::parse(&Md5Algo.digest(word).unwrap(), AlgorithmType::Md5).unwrap()
    }

    #[test]
    fn finds_match_and_counts_attempts() {
        let state = SharedSearchState::new(100, CancelToken::new());
        let target = target("c");
        let ctx = ScanContext {
            algorithm: &Md5Algo,
            target: &target,
            state: &state,
            flush_interval: 1000,
        };

        let outcome = Worker::new(0, ctx).scan(words(&["a", "b", "c", "d"]));
        assert_eq!(outcome, ScanOutcome::Matched { won: true });
        assert_eq!(state.attempts(), 3);
        assert_eq!(state.rejected(), words(&["a", "b"]));
    }

    #[test]
    fn flushes_in_batches() {
        let state = SharedSearchState::new(0, CancelToken::new());
        let target = target("never");
        let ctx = ScanContext {
            algorithm: &Md5Algo,
            target: &target,
            state: &state,
            flush_interval: 10,
        };
        let chunk: Vec<Candidate> = (0..25).map(|i| i.to_string()).collect();

        let mut worker = Worker::new(0, ctx);
        assert_eq!(worker.scan(chunk), ScanOutcome::Exhausted);
        assert_eq!(state.attempts(), 20);
        drop(worker);
        assert_eq!(state.attempts(), 25);
    }

    #[test]
    fn stops_before_hashing_once_signalled() {
        let state = SharedSearchState::new(10, CancelToken::new());
        state.claim("someone-else");
        let target = target("x");
        let ctx = ScanContext {
            algorithm: &Md5Algo,
            target: &target,
            state: &state,
            flush_interval: 1,
        };
        assert_eq!(Worker::new(0, ctx).scan(words(&["x"])), ScanOutcome::Stopped);
        assert_eq!(state.attempts(), 0);
    }

    struct Picky;

    impl Algorithm for Picky {
        fn hash(&self, candidate: &[u8]) -> Result<Vec<u8>, AuditError> {
            if candidate.starts_with(b"bad") {
                return Err(AuditError::CandidateEncoding("unsupported".into()));
            }
            Md5Algo.hash(candidate)
        }

        fn algorithm_type(&self) -> AlgorithmType {
            AlgorithmType::Md5
        }
    }

    #[test]
    fn hashing_failures_are_skipped() {
        let state = SharedSearchState::new(10, CancelToken::new());
        let target = target("good2");
        let ctx = ScanContext {
            algorithm: &Picky,
            target: &target,
            state: &state,
            flush_interval: 1000,
        };
        let outcome = Worker::new(0, ctx).scan(words(&["bad1", "good1", "bad2", "good2"]));
        assert_eq!(outcome, ScanOutcome::Matched { won: true });
        assert_eq!(state.attempts(), 2);
    }
}
