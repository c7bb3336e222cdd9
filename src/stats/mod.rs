//! Progress reporting
//!
//! [`StatsReporter`] watches the state an [`crate::engine::Auditor`]
//! publishes and periodically logs:
//! - current stage and attempts
//! - average hash rate
//! - host CPU and memory load
//!
//! [`bench::hash_until`] drives the throughput benchmark.

/// Raw digest throughput measurement
pub mod bench;

/// Submodule containing the reporter thread and its snapshots
pub mod reporter;

// Re-export main components
pub use reporter::{HardwareStats, ProgressSnapshot, ReporterHandle, StatsReporter};
