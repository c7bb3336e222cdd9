// src/stats/bench.rs
use crate::engine::algorithm::Algorithm;
use crate::engine::state::SharedSearchState;
use std::hint::black_box;
use std::time::Instant;

/// Hashes flushed into the shared counter at a time
const BENCH_FLUSH: u64 = 10_000;

/// Hashes a rolling counter until `deadline`, returning how many were done
///
/// Counts are flushed into `state` in blocks and once more on exit, so a
/// reporter watching it sees live throughput. Thread `id` owns its own
/// counter range.
pub fn hash_until(
    algorithm: &dyn Algorithm,
    state: &SharedSearchState,
    id: usize,
    deadline: Instant,
) -> u64 {
    let mut counter = (id as u64) << 48;
    let mut pending = 0u64;
    let mut total = 0u64;
    let mut window = 0u64;
    let mut last_log = Instant::now();

    while Instant::now() < deadline {
        let bytes = counter.to_le_bytes();
        black_box(algorithm.hash(black_box(&bytes)).ok());
        counter = counter.wrapping_add(1);
        pending += 1;
        window += 1;

        if pending == BENCH_FLUSH {
            state.record(pending, &mut Vec::new());
            total += pending;
            pending = 0;
        }

        // Log progress every second
        if last_log.elapsed().as_secs() >= 1 {
            log::debug!(
                "Thread {}: {:.1} H/s",
                id,
                window as f64 / last_log.elapsed().as_secs_f64()
            );
            window = 0;
            last_log = Instant::now();
        }
    }

    state.record(pending, &mut Vec::new());
    total + pending
}
