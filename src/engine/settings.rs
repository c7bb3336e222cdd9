// src/engine/settings.rs
//! Tunables for one auditor

/// Engine tunables, usually built from [`crate::config::Config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Worker threads per run
    pub workers: usize,
    /// Longest candidate generated by the built-in stages
    pub max_length: usize,
    /// Comparisons between shared counter flushes
    pub flush_interval: u64,
    /// Rejected candidates remembered for adaptive follow-up
    pub rejected_capacity: usize,
    /// Largest combinatorial space enumerated exhaustively before sampling
    pub sample_ceiling: usize,
    /// Candidates pulled from a stage source per dispatch
    pub stage_batch_size: usize,
    /// Candidates per dictionary batch
    pub dictionary_batch_size: usize,
    /// Streaming queue capacity, in batches per worker
    pub queue_factor: usize,
    /// Most candidates the adaptive stage may produce
    pub adaptive_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            workers: default_workers(),
            max_length: 8,
            flush_interval: 1000,
            rejected_capacity: 10_000,
            sample_ceiling: 500_000,
            stage_batch_size: 100_000,
            dictionary_batch_size: 10_000,
            queue_factor: 2,
            adaptive_limit: 200_000,
        }
    }
}

impl SearchSettings {
    /// Streaming queue capacity in batches
    pub fn queue_capacity(&self) -> usize {
        self.workers.max(1) * self.queue_factor.max(1)
    }
}

/// Twice the logical CPUs, capped at 16
pub fn default_workers() -> usize {
    (num_cpus::get() * 2).clamp(1, 16)
}
