// src/main.rs
use arc_swap::ArcSwapOption;
use clap::Parser;
use hash_auditor_rs::cli::{self, Action, SearchOptions, StagedOptions};
use hash_auditor_rs::engine::candidates::{BatchReader, FileBatchReader, TargetProfile};
use hash_auditor_rs::engine::{
    Auditor, CancelToken, SearchReport, SearchResult, SharedSearchState, StagePlan,
    create_algorithm,
};
use hash_auditor_rs::stats::{StatsReporter, bench};
use hash_auditor_rs::types::AlgorithmType;
use hash_auditor_rs::utils::logging::init_bench_logging;
use hash_auditor_rs::{AuditError, Config, config, init_logging};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Main entry point for the auditor
///
/// Parses command line arguments, delegates to the subcommand handler and
/// propagates configuration-time errors upward.
fn main() -> Result<(), AuditError> {
    let cli = cli::Commands::parse();

    match cli.action {
        Action::Crack(opts) => {
            let (auditor, config, profile) = prepare(&opts.search, Some(&opts.staged), None)?;
            execute(auditor, &config, opts.search.json, move |auditor, cancel| {
                let plan = StagePlan::standard(auditor.settings(), &profile);
                log::info!("Staged search plan: {}", plan.names().join(", "));
                auditor.run_staged(plan, cancel)
            })
        }
        Action::Dictionary(opts) => {
            let (auditor, config, _) = prepare(&opts.search, None, opts.chunk)?;
            let mut reader = FileBatchReader::open(&opts.file)?;
            log::info!("Streaming dictionary {}", opts.file.display());
            execute(auditor, &config, opts.search.json, move |auditor, cancel| {
                auditor.run_dictionary(&mut reader, cancel)
            })
        }
        Action::Hybrid(opts) => {
            let (auditor, config, profile) =
                prepare(&opts.search, Some(&opts.staged), opts.chunk)?;
            let mut reader = opts
                .file
                .as_ref()
                .map(|path| FileBatchReader::open(path))
                .transpose()?;
            execute(auditor, &config, opts.search.json, move |auditor, cancel| {
                let plan = StagePlan::standard(auditor.settings(), &profile);
                let reader = reader.as_mut().map(|r| r as &mut dyn BatchReader);
                auditor.run_hybrid(plan, reader, cancel)
            })
        }
        Action::Benchmark(opts) => run_benchmark(opts),
        Action::Config(opts) => generate_config(opts),
    }
}

/// Loads configuration, applies CLI overrides and validates the target
///
/// Everything that can refuse a run happens here, before any worker or
/// runtime exists.
fn prepare(
    search: &SearchOptions,
    staged: Option<&StagedOptions>,
    chunk: Option<usize>,
) -> Result<(Auditor, Config, TargetProfile), AuditError> {
    init_logging(search.verbose);

    let mut config = config::load(search.config.as_ref())?;
    // Apply CLI overrides
    if let Some(method) = search.method {
        config.algorithm = method.to_string();
    }
    if let Some(threads) = search.threads {
        config.worker_threads = threads;
    }
    if let Some(chunk) = chunk {
        config.dictionary_batch_size = chunk;
    }
    let mut profile = config.target.clone();
    if let Some(staged) = staged {
        if let Some(max_length) = staged.max_length {
            config.max_length = max_length;
        }
        profile = TargetProfile {
            username: staged.username.clone().or(profile.username),
            email: staged.email.clone().or(profile.email),
            name: staged.name.clone().or(profile.name),
        };
    }

    let auditor = Auditor::from_hex(&config.algorithm, &search.hash, config.search_settings())?;
    log::info!(
        "Auditing {} digest {} with {} workers",
        config.algorithm,
        auditor.target(),
        auditor.settings().workers
    );
    Ok((auditor, config, profile))
}

/// Runs one search on a blocking thread while Ctrl-C and progress
/// reporting are serviced around it
fn execute<F>(auditor: Auditor, config: &Config, json: bool, job: F) -> Result<(), AuditError>
where
    F: FnOnce(&Auditor, &CancelToken) -> SearchReport + Send + 'static,
{
    let auditor = Arc::new(auditor);
    let cancel = CancelToken::new();
    let reporter =
        StatsReporter::new(auditor.state_slot(), config.report_interval()).start_reporting()?;

    let rt = Runtime::new()?;
    let report = rt.block_on(async {
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::warn!("Interrupt received, stopping workers");
                    cancel.cancel();
                }
            })
        };

        let token = cancel.clone();
        let search = Arc::clone(&auditor);
        let result = tokio::task::spawn_blocking(move || job(&search, &token)).await;
        watcher.abort();
        result
    })?;

    reporter.stop();
    print_report(&report, json)
}

fn print_report(report: &SearchReport, json: bool) -> Result<(), AuditError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    match &report.result {
        SearchResult::Found(candidate) => log::info!("Result: FOUND \"{}\"", candidate),
        SearchResult::NotFound => log::info!("Result: not found"),
        SearchResult::Aborted => log::info!("Result: aborted"),
    }
    log::info!("Attempts: {}", report.attempts);
    log::info!("Elapsed: {:.2?}", report.elapsed);
    log::info!("Average rate: {:.2} H/s", report.rate());
    if let Some(high_water) = report.queue_high_water {
        log::info!("Queue high-water: {} batches", high_water);
    }
    if report.skipped_lines > 0 {
        log::warn!("Skipped {} undecodable dictionary lines", report.skipped_lines);
    }
    log::logger().flush();
    Ok(())
}

/// Measures raw digest throughput
///
/// Each thread hashes a rolling counter for the requested duration and
/// flushes its count into a shared state the reporter watches.
fn run_benchmark(opts: cli::BenchmarkOptions) -> Result<(), AuditError> {
    init_bench_logging();

    let algorithm = create_algorithm(opts.algorithm);
    let state = Arc::new(SharedSearchState::new(0, CancelToken::new()));
    state.set_stage("benchmark");
    let slot = Arc::new(ArcSwapOption::from(Some(Arc::clone(&state))));
    let reporter = StatsReporter::new(slot, Duration::from_secs(5)).start_reporting()?;

    log::info!(
        "Starting {} benchmark for {} seconds on {} threads",
        opts.algorithm,
        opts.duration,
        opts.threads
    );

    let duration = Duration::from_secs(opts.duration);
    let start_time = Instant::now();
    let deadline = start_time + duration;
    std::thread::scope(|scope| {
        for id in 0..opts.threads.max(1) {
            let algo = Arc::clone(&algorithm);
            let state = &state;
            scope.spawn(move || bench::hash_until(algo.as_ref(), state, id, deadline));
        }
    });

    reporter.stop();
    let total = state.attempts();
    let secs = start_time.elapsed().as_secs_f64();
    log::info!("Benchmark results ({}):", bench_label(opts.algorithm));
    log::info!("Total hashes: {}", total);
    log::info!("Average hashrate: {:.2} H/s", total as f64 / secs.max(f64::EPSILON));
    log::logger().flush();

    Ok(())
}

fn bench_label(algorithm: AlgorithmType) -> String {
    format!("{}, {}-bit", algorithm, algorithm.hex_len() * 4)
}

/// Writes a configuration template file
fn generate_config(opts: cli::ConfigOptions) -> Result<(), AuditError> {
    init_logging(false);
    let template = config::generate_template(opts.target);
    std::fs::write(&opts.output, template)?;
    log::info!("Wrote configuration template to {}", opts.output.display());
    Ok(())
}
