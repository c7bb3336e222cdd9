// src/utils/logging.rs
//! Logging configuration
//!
//! Uses `env_logger` with a compact `[ts level thread module:line] message`
//! layout. Worker threads are named (`audit-worker-3`, `audit-stream-0`), so
//! the thread column shows which worker claimed a match or failed.
//! `RUST_LOG` always wins over the built-in defaults.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes logging at `Info`, or `Debug` when `verbose` is set
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_with_default(level);
}

/// Benchmark runs default to `Debug` so per-thread rates are visible
pub fn init_bench_logging() {
    init_with_default(LevelFilter::Debug);
}

fn init_with_default(level: LevelFilter) {
    let mut builder = common_log_config();

    if env::var("RUST_LOG").is_err() {
        builder.filter_level(level);
    } else {
        builder.parse_env("RUST_LOG");
    }

    // A second init (e.g. hybrid runs in tests) is harmless.
    let _ = builder.try_init();
}

fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            let ts = buf.timestamp_seconds();
            let level = record.level();
            let module = record.module_path().unwrap_or_default();
            let line = record.line().unwrap_or(0);
            let thread = std::thread::current();

            writeln!(
                buf,
                "[{} {} {} {}:{}] {}",
                ts,
                level,
                thread.name().unwrap_or("-"),
                module,
                line,
                record.args()
            )
        })
        .target(Target::Stdout);

    builder
}
