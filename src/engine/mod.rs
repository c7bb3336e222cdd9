// src/engine/mod.rs
//! Search engine core
//!
//! The engine is split along the same seams as a classic work scheduler:
//! - [`algorithm`]: the hash oracle
//! - [`candidates`]: where guesses come from
//! - [`pool`] and [`stream`]: how guesses reach worker threads
//! - [`state`]: the single shared record of attempts, rejects and the winner
//! - [`orchestrator`]: stage sequencing and the [`Auditor`] entry point

/// Hash oracles (MD5, SHA-1, SHA-256)
pub mod algorithm;

/// Candidate sources for every stage type
pub mod candidates;

/// Stage sequencing and public entry points
pub mod orchestrator;

/// Splitting batches into per-worker chunks
pub mod partition;

/// Fixed worker pool for staged mode
pub mod pool;

/// Final results and counters
pub mod report;

/// Engine tunables
pub mod settings;

/// Stage definitions and the standard plan
pub mod stage;

/// Shared search state and cancellation
pub mod state;

/// Bounded-queue streaming for dictionaries
pub mod stream;

/// Per-thread candidate evaluation
pub mod worker;

pub use algorithm::{Algorithm, algorithm_by_name, create_algorithm};
pub use orchestrator::{Auditor, Phase, StageOrchestrator, StateSlot};
pub use report::{SearchReport, SearchResult, StageSummary};
pub use settings::SearchSettings;
pub use stage::{Stage, StagePlan};
pub use state::{CancelToken, SharedSearchState};
