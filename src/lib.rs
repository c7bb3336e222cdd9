//! Hash Auditor - concurrent staged hash search for password auditing
//!
//! Given an unsalted MD5, SHA-1 or SHA-256 digest, this crate searches for a
//! plaintext that produces it:
//! - Staged search: curated lists, target-derived guesses, numeric and
//!   alphanumeric spaces, then mutations of everything that failed
//! - Streaming dictionary search over arbitrarily large wordlists with a
//!   bounded queue
//! - Hybrid search combining the two
//!
//! At most one winner is ever reported, and every worker stops promptly
//! once it is claimed or the run is interrupted.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Search engine core: oracles, candidate sources, workers and stages
pub mod engine;

/// Progress reporting
pub mod stats;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use engine::{
    Algorithm, Auditor, CancelToken, SearchReport, SearchResult, SearchSettings, Stage, StagePlan,
};
pub use stats::StatsReporter;
pub use types::{AlgorithmType, Candidate, Digest};
pub use utils::{AuditError, init_logging};
