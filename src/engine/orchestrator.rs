// src/engine/orchestrator.rs
//! Stage sequencing and the public search entry points
//!
//! [`Auditor`] owns the oracle, the target and the worker pool. Every call
//! to one of its `run_*` methods creates fresh [`SharedSearchState`],
//! publishes it for reporters, runs, and returns a [`SearchReport`].

use crate::engine::algorithm::{Algorithm, algorithm_by_name};
use crate::engine::candidates::{AdaptiveSource, BatchReader, CandidateSource};
use crate::engine::pool::WorkerPool;
use crate::engine::report::{SearchReport, SearchResult, StageSummary};
use crate::engine::settings::SearchSettings;
use crate::engine::stage::{StageKind, StagePlan};
use crate::engine::state::{CancelToken, SharedSearchState};
use crate::engine::stream::{StreamConfig, run_streaming};
use crate::engine::worker::ScanContext;
use crate::types::Digest;
use crate::utils::error::AuditError;
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Slot through which the currently running state is observed
pub type StateSlot = Arc<ArcSwapOption<SharedSearchState>>;

/// Lifecycle of a staged run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started
    Idle,
    /// Running the stage at this index
    Running(usize),
    /// A winner was claimed
    Succeeded,
    /// Every stage ran dry
    Exhausted,
    /// Stopped by an external interrupt
    Aborted,
}

/// Runs stages in order against one shared state
pub struct StageOrchestrator<'a> {
    pool: &'a WorkerPool,
    settings: &'a SearchSettings,
    ctx: ScanContext<'a>,
    phase: Phase,
}

impl<'a> StageOrchestrator<'a> {
    /// Prepares an idle orchestrator
    pub fn new(pool: &'a WorkerPool, settings: &'a SearchSettings, ctx: ScanContext<'a>) -> Self {
        StageOrchestrator {
            pool,
            settings,
            ctx,
            phase: Phase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn transition(&mut self, next: Phase) {
        log::debug!("Search phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    /// Runs the plan until a winner, an interrupt, or exhaustion
    ///
    /// A stage whose predecessor produced a winner is never started, and its
    /// source is never asked for a batch.
    pub fn run(&mut self, plan: StagePlan) -> Vec<StageSummary> {
        let state = self.ctx.state;
        let mut summaries = Vec::new();

        for (index, stage) in plan.into_stages().into_iter().enumerate() {
            if state.should_stop() {
                break;
            }
            let (name, kind) = stage.into_parts();
            self.transition(Phase::Running(index));
            state.set_stage(&name);

            let mut source: Box<dyn CandidateSource> = match kind {
                StageKind::Source(source) => source,
                StageKind::Adaptive => Box::new(AdaptiveSource::new(
                    state.rejected(),
                    self.settings.adaptive_limit,
                    self.settings.max_length,
                )),
            };

            let dispatched = self.drain(source.as_mut());
            log::info!("Stage {} finished: {} candidates dispatched", name, dispatched);
            summaries.push(StageSummary { name, dispatched });
        }

        let terminal = match state.outcome() {
            SearchResult::Found(_) => Phase::Succeeded,
            SearchResult::Aborted => Phase::Aborted,
            SearchResult::NotFound => Phase::Exhausted,
        };
        self.transition(terminal);
        summaries
    }

    fn drain(&self, source: &mut dyn CandidateSource) -> u64 {
        let mut dispatched = 0u64;
        while !self.ctx.state.should_stop() {
            match source.next_batch(self.settings.stage_batch_size) {
                Some(batch) if !batch.is_empty() => {
                    dispatched += self.pool.run_batch(batch, self.ctx) as u64;
                }
                _ => break,
            }
        }
        dispatched
    }
}

/// Searches for a plaintext matching one target digest
pub struct Auditor {
    algorithm: Arc<dyn Algorithm>,
    target: Digest,
    settings: SearchSettings,
    pool: WorkerPool,
    slot: StateSlot,
}

impl Auditor {
    /// Creates an auditor with its worker pool
    pub fn new(
        algorithm: Arc<dyn Algorithm>,
        target: Digest,
        settings: SearchSettings,
    ) -> Result<Self, AuditError> {
        let pool = WorkerPool::new(settings.workers)?;
        log::debug!(
            "Auditor ready: {} target {}, {} workers",
            algorithm.algorithm_type(),
            target,
            pool.size()
        );
        Ok(Auditor {
            algorithm,
            target,
            settings,
            pool,
            slot: Arc::new(ArcSwapOption::empty()),
        })
    }

    /// Validates configuration-time inputs and creates an auditor
    ///
    /// Fails with `UnsupportedAlgorithm` or `InvalidDigest` before any
    /// thread is started.
    pub fn from_hex(
        algorithm: &str,
        target_hex: &str,
        settings: SearchSettings,
    ) -> Result<Self, AuditError> {
        let algorithm = algorithm_by_name(algorithm)?;
        let target = Digest::parse(target_hex, algorithm.algorithm_type())?;
        Self::new(algorithm, target, settings)
    }

    /// Settings in effect
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Target digest
    pub fn target(&self) -> &Digest {
        &self.target
    }

    /// Slot holding the state of the run in progress (or the last run)
    pub fn state_slot(&self) -> StateSlot {
        Arc::clone(&self.slot)
    }

    fn fresh_state(&self, cancel: &CancelToken) -> Arc<SharedSearchState> {
        let state = Arc::new(SharedSearchState::new(
            self.settings.rejected_capacity,
            cancel.clone(),
        ));
        self.slot.store(Some(Arc::clone(&state)));
        state
    }

    fn context<'a>(&'a self, state: &'a SharedSearchState) -> ScanContext<'a> {
        ScanContext {
            algorithm: self.algorithm.as_ref(),
            target: &self.target,
            state,
            flush_interval: self.settings.flush_interval.max(1),
        }
    }

    /// Staged in-memory search over `plan`
    pub fn run_staged(&self, plan: StagePlan, cancel: &CancelToken) -> SearchReport {
        let state = self.fresh_state(cancel);
        let mut orchestrator =
            StageOrchestrator::new(&self.pool, &self.settings, self.context(&state));
        let stages = orchestrator.run(plan);

        let report = SearchReport {
            result: state.outcome(),
            attempts: state.attempts(),
            elapsed: state.elapsed(),
            stages,
            queue_high_water: None,
            skipped_lines: 0,
        };
        log_outcome(&report);
        report
    }

    /// Streaming dictionary search
    pub fn run_dictionary(&self, reader: &mut dyn BatchReader, cancel: &CancelToken) -> SearchReport {
        let state = self.fresh_state(cancel);
        state.set_stage("dictionary");
        let config = StreamConfig {
            workers: self.settings.workers,
            batch_size: self.settings.dictionary_batch_size,
            queue_capacity: self.settings.queue_capacity(),
        };
        let stats = run_streaming(reader, config, self.context(&state));

        let report = SearchReport {
            result: state.outcome(),
            attempts: state.attempts(),
            elapsed: state.elapsed(),
            stages: vec![StageSummary {
                name: "dictionary".to_string(),
                dispatched: stats.dispatched,
            }],
            queue_high_water: Some(stats.high_water),
            skipped_lines: reader.skipped(),
        };
        log_outcome(&report);
        report
    }

    /// Staged search, then the dictionary if nothing was found
    pub fn run_hybrid(
        &self,
        plan: StagePlan,
        reader: Option<&mut dyn BatchReader>,
        cancel: &CancelToken,
    ) -> SearchReport {
        let staged = self.run_staged(plan, cancel);
        match (staged.result.is_found(), cancel.is_cancelled(), reader) {
            (false, false, Some(reader)) => {
                log::info!("Staged search exhausted, switching to dictionary");
                staged.chain(self.run_dictionary(reader, cancel))
            }
            _ => staged,
        }
    }
}

fn log_outcome(report: &SearchReport) {
    match &report.result {
        SearchResult::Found(_) => log::info!(
            "Match found after {} attempts in {:.2?}",
            report.attempts,
            report.elapsed
        ),
        SearchResult::NotFound => log::info!(
            "Search exhausted: {} attempts in {:.2?}",
            report.attempts,
            report.elapsed
        ),
        SearchResult::Aborted => log::warn!(
            "Search interrupted after {} attempts in {:.2?}",
            report.attempts,
            report.elapsed
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::candidates::StaticList;
    use crate::engine::stage::Stage;

    fn settings(workers: usize) -> SearchSettings {
        SearchSettings {
            workers,
            stage_batch_size: 1000,
            ..SearchSettings::default()
        }
    }

    #[test]
    fn phases_end_in_exhausted_without_match() {
        let auditor = Auditor::from_hex("md5", &"0".repeat(32), settings(2)).unwrap();
        let state = SharedSearchState::new(100, CancelToken::new());
        let mut orchestrator =
            StageOrchestrator::new(&auditor.pool, &auditor.settings, auditor.context(&state));
        assert_eq!(orchestrator.phase(), Phase::Idle);

        let plan = StagePlan::new().with(Stage::new("tiny", StaticList::from_strs(&["a", "b"])));
        let stages = orchestrator.run(plan);

        assert_eq!(orchestrator.phase(), Phase::Exhausted);
        let names: Vec<_> = stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["tiny", "adaptive"]);
        // Adaptive mutations of "a" and "b" were hashed too.
        assert!(state.attempts() > 2);
    }

    #[test]
    fn invalid_inputs_refuse_to_start() {
        assert!(matches!(
            Auditor::from_hex("rot13", &"0".repeat(32), settings(1)),
            Err(AuditError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            Auditor::from_hex("sha1", &"0".repeat(32), settings(1)),
            Err(AuditError::InvalidDigest(_))
        ));
    }

    #[test]
    fn slot_publishes_latest_state() {
        let auditor = Auditor::from_hex("md5", &"0".repeat(32), settings(1)).unwrap();
        let slot = auditor.state_slot();
        assert!(slot.load().is_none());

        let plan = StagePlan::new().with(Stage::new("one", StaticList::from_strs(&["x"])));
        auditor.run_staged(plan, &CancelToken::new());

        let state = slot.load_full().unwrap();
        assert_eq!(state.stage(), "adaptive");
        assert!(state.attempts() >= 1);
    }
}
