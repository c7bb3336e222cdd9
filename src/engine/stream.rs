// src/engine/stream.rs
//! Producer / bounded queue / persistent workers for dictionary search
//!
//! One producer (the calling thread) reads batches and pushes them into a
//! bounded crossbeam channel; `send` blocks when the queue is full, which is
//! the backpressure that keeps memory flat on huge dictionaries. Workers
//! block on an empty queue and exit on a [`WorkItem::Shutdown`] sentinel,
//! one of which is sent per worker once production ends.

use crate::engine::candidates::BatchReader;
use crate::engine::pool::panic_message;
use crate::engine::worker::{ScanContext, Worker};
use crate::types::Candidate;
use crate::utils::error::AuditError;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Message on the batch queue
#[derive(Debug)]
pub enum WorkItem {
    /// Candidates to evaluate
    Batch(Vec<Candidate>),
    /// Tells one worker to exit
    Shutdown,
}

/// Queue and batch sizing for one streaming run
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Number of persistent workers
    pub workers: usize,
    /// Candidates per batch read from the source
    pub batch_size: usize,
    /// Queue capacity, in batches
    pub queue_capacity: usize,
}

/// Producer-side counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Batches handed to the queue
    pub batches: u64,
    /// Candidates handed to the queue
    pub dispatched: u64,
    /// Deepest the queue was observed right after a send
    pub high_water: usize,
}

/// Runs a streaming search until the reader is exhausted or a stop signal
/// fires
///
/// A read error ends production early; it is logged and the run finishes
/// with whatever the workers found.
pub fn run_streaming(
    reader: &mut dyn BatchReader,
    config: StreamConfig,
    ctx: ScanContext<'_>,
) -> StreamStats {
    let workers = config.workers.max(1);
    let (tx, rx) = bounded::<WorkItem>(config.queue_capacity.max(1));

    thread::scope(|scope| {
        for id in 0..workers {
            let rx = rx.clone();
            let spawned = thread::Builder::new()
                .name(format!("audit-stream-{id}"))
                .spawn_scoped(scope, move || consume(id, rx, ctx));
            if let Err(e) = spawned {
                log::warn!("Failed to spawn stream worker {}: {}", id, e);
            }
        }
        // Only workers hold receivers: if they all die, sends fail instead
        // of blocking forever.
        drop(rx);

        let mut stats = StreamStats::default();
        if let Err(e) = produce(reader, &tx, config.batch_size, ctx, &mut stats) {
            log::error!("Dictionary production stopped: {}", e);
        }

        for _ in 0..workers {
            if tx.send(WorkItem::Shutdown).is_err() {
                break;
            }
        }
        stats
    })
}

fn produce(
    reader: &mut dyn BatchReader,
    tx: &Sender<WorkItem>,
    batch_size: usize,
    ctx: ScanContext<'_>,
    stats: &mut StreamStats,
) -> Result<(), AuditError> {
    while !ctx.state.should_stop() {
        let Some(batch) = reader.read_next_batch(batch_size)? else {
            break;
        };
        let len = batch.len() as u64;
        tx.send(WorkItem::Batch(batch))?;
        stats.batches += 1;
        stats.dispatched += len;
        stats.high_water = stats.high_water.max(tx.len());
    }
    Ok(())
}

fn consume(id: usize, rx: Receiver<WorkItem>, ctx: ScanContext<'_>) {
    let mut worker = Worker::new(id, ctx);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        for item in rx.iter() {
            match item {
                // After a stop, scan returns at once, so the queue drains
                // quickly and the producer is never left blocked.
                WorkItem::Batch(batch) => {
                    worker.scan(batch);
                }
                WorkItem::Shutdown => break,
            }
        }
    }));
    if let Err(payload) = result {
        let err = AuditError::WorkerInternal(panic_message(payload.as_ref()));
        log::warn!("Stream worker {} terminated early: {}", id, err);
    }
}
