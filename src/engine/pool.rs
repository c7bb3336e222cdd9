// src/engine/pool.rs
//! Fixed-size worker pool for staged search
//!
//! Each batch is partitioned and every chunk is handed to one pool thread.
//! The call returns once every chunk has been scanned or abandoned; after a
//! winner is claimed the remaining workers bail out at their next stop check,
//! so that wait is bounded by a single hash.

use crate::engine::partition::partition;
use crate::engine::worker::{ScanContext, Worker};
use crate::types::Candidate;
use crate::utils::error::AuditError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Fixed set of worker threads reused across stages
pub struct WorkerPool {
    pool: ThreadPool,
    size: usize,
}

impl WorkerPool {
    /// Spawns `size` worker threads (at least one)
    pub fn new(size: usize) -> Result<Self, AuditError> {
        let size = size.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("audit-worker-{i}"))
            .build()?;
        Ok(WorkerPool { pool, size })
    }

    /// Number of worker slots
    pub fn size(&self) -> usize {
        self.size
    }

    /// Partitions `batch` and scans one chunk per worker
    ///
    /// Returns the number of candidates dispatched. A worker that fails
    /// internally is logged and dropped; the others carry on.
    pub fn run_batch(&self, batch: Vec<Candidate>, ctx: ScanContext<'_>) -> usize {
        let dispatched = batch.len();
        let chunks = partition(batch, self.size);

        self.pool.scope(|scope| {
            for (id, chunk) in chunks.into_iter().enumerate() {
                scope.spawn(move |_| {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| {
                        Worker::new(id, ctx).scan(chunk)
                    }));
                    if let Err(payload) = result {
                        let err = AuditError::WorkerInternal(panic_message(payload.as_ref()));
                        log::warn!("Worker {} terminated early: {}", id, err);
                    }
                });
            }
        });

        dispatched
    }
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
