// src/engine/partition.rs
//! Splits a candidate batch into per-worker chunks

use crate::types::Candidate;

/// Splits `batch` into at most `worker_count` contiguous chunks
///
/// Chunk size is `ceil(len / worker_count)` (at least 1), so every chunk
/// but the last is full and the last absorbs whatever is left. An empty
/// batch yields no chunks. Order is preserved.
pub fn partition(batch: Vec<Candidate>, worker_count: usize) -> Vec<Vec<Candidate>> {
    if batch.is_empty() {
        return Vec::new();
    }
    let workers = worker_count.max(1);
    let chunk_size = batch.len().div_ceil(workers).max(1);

    let mut chunks = Vec::with_capacity(workers.min(batch.len()));
    let mut rest = batch;
    while rest.len() > chunk_size {
        let tail = rest.split_off(chunk_size);
        chunks.push(rest);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}
