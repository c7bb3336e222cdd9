// tests/search_scenarios.rs
//! End-to-end search scenarios through the public `Auditor` API

use hash_auditor_rs::engine::algorithm::{Algorithm, Md5Algo, Sha256Algo};
use hash_auditor_rs::engine::candidates::{
    BatchReader, CandidateSource, FileBatchReader, StaticList, TargetProfile,
};
use hash_auditor_rs::{
    AlgorithmType, AuditError, Auditor, Candidate, CancelToken, Digest, SearchReport,
    SearchResult, SearchSettings, Stage, StagePlan,
};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

fn md5_hex(word: &str) -> String {
    Md5Algo.digest(word).unwrap()
}

fn settings(workers: usize) -> SearchSettings {
    SearchSettings {
        workers,
        stage_batch_size: 1000,
        dictionary_batch_size: 100,
        ..SearchSettings::default()
    }
}

/// Counts how often it is asked for a batch
struct Counting {
    calls: Arc<AtomicUsize>,
    inner: StaticList,
}

impl Counting {
    fn new(items: &[&str]) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Counting {
            calls: Arc::clone(&calls),
            inner: StaticList::from_strs(items),
        };
        (source, calls)
    }
}

impl CandidateSource for Counting {
    fn next_batch(&mut self, max: usize) -> Option<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.next_batch(max)
    }
}

/// Cancels the run the first time it is asked for candidates
struct Interrupting {
    cancel: CancelToken,
}

impl CandidateSource for Interrupting {
    fn next_batch(&mut self, _: usize) -> Option<Vec<Candidate>> {
        self.cancel.cancel();
        Some(vec!["never-hashed".to_string(); 50])
    }
}

#[test]
fn curated_hit_at_position_five() {
    let auditor = Auditor::from_hex("md5", &md5_hex("letmein"), settings(1)).unwrap();
    let (later, calls) = Counting::new(&["unused"]);
    let plan = StagePlan::new()
        .with(Stage::new(
            "curated",
            StaticList::from_strs(&["123456", "password", "qwerty", "abc123", "letmein", "monkey"]),
        ))
        .with(Stage::new("later", later));

    let report = auditor.run_staged(plan, &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("letmein".into()));
    assert_eq!(report.attempts, 5);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(report.stages.len(), 1);
}

#[test]
fn later_stages_are_never_started_after_a_match() {
    let auditor = Auditor::from_hex("md5", &md5_hex("b2"), settings(4)).unwrap();
    let (c, calls) = Counting::new(&["c1", "c2"]);
    let plan = StagePlan::new()
        .with(Stage::new("a", StaticList::from_strs(&["a1", "a2", "a3"])))
        .with(Stage::new("b", StaticList::from_strs(&["b1", "b2", "b3"])))
        .with(Stage::new("c", c));

    let report = auditor.run_staged(plan, &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("b2".into()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(report.attempts >= 4 && report.attempts <= 6);
    let names: Vec<_> = report.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn adaptive_stage_finds_a_mutation_of_a_rejected_guess() {
    let config = SearchSettings {
        max_length: 12,
        ..settings(2)
    };
    let auditor = Auditor::from_hex("md5", &md5_hex("Dragon2024"), config).unwrap();
    let plan = StagePlan::new().with(Stage::new(
        "seed",
        StaticList::from_strs(&["dragon", "monkey", "shadow"]),
    ));

    let report = auditor.run_staged(plan, &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("Dragon2024".into()));
    assert_eq!(report.stages.last().unwrap().name, "adaptive");
}

#[test]
fn interrupt_freezes_the_counter_and_aborts() {
    let auditor = Auditor::from_hex("md5", &md5_hex("not-in-any-stage"), settings(4)).unwrap();
    let cancel = CancelToken::new();
    let first: Vec<String> = (0..5000).map(|i| format!("guess{i}")).collect();
    let (after, calls) = Counting::new(&["x"]);
    let plan = StagePlan::new()
        .with(Stage::new("first", StaticList::new(first)))
        .with(Stage::new(
            "interrupting",
            Interrupting {
                cancel: cancel.clone(),
            },
        ))
        .with(Stage::new("after", after));

    let report = auditor.run_staged(plan, &cancel);

    assert_eq!(report.result, SearchResult::Aborted);
    assert_eq!(report.attempts, 5000);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// MD5 that takes a fixed time per candidate, so runs last long enough to
/// be interrupted mid-chunk
struct Slow;

impl Algorithm for Slow {
    fn hash(&self, candidate: &[u8]) -> Result<Vec<u8>, AuditError> {
        thread::sleep(Duration::from_micros(200));
        Md5Algo.hash(candidate)
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Md5
    }
}

/// Numbered words in fixed-size batches, far more than any test hashes
struct Endless {
    next: u64,
}

impl BatchReader for Endless {
    fn read_next_batch(&mut self, size: usize) -> Result<Option<Vec<Candidate>>, AuditError> {
        let start = self.next;
        self.next += size as u64;
        Ok(Some((start..self.next).map(|i| format!("w{i}")).collect()))
    }
}

fn slow_auditor() -> Auditor {
    let target = Digest::parse(&md5_hex("never-generated"), AlgorithmType::Md5).unwrap();
    Auditor::new(Arc::new(Slow), target, settings(4)).unwrap()
}

/// Runs `search` while another thread cancels after `delay`
fn interrupt_after<F>(auditor: &Auditor, delay: Duration, search: F) -> (SearchReport, Duration)
where
    F: FnOnce(&CancelToken) -> SearchReport,
{
    let cancel = CancelToken::new();
    let started = Instant::now();
    let report = thread::scope(|s| {
        let token = cancel.clone();
        s.spawn(move || {
            thread::sleep(delay);
            token.cancel();
        });
        search(&cancel)
    });
    let took = started.elapsed();

    // Nothing may reach the counter once the run has returned.
    let state = auditor.state_slot().load_full().unwrap();
    let right_after = state.attempts();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(state.attempts(), right_after);
    assert_eq!(report.attempts, right_after);
    (report, took)
}

#[test]
fn interrupt_while_staged_workers_are_hashing() {
    let auditor = slow_auditor();
    let words: Vec<String> = (0..200_000).map(|i| format!("w{i}")).collect();

    let (report, took) = interrupt_after(&auditor, Duration::from_millis(150), |cancel| {
        let plan = StagePlan::new().with(Stage::new("slow", StaticList::new(words)));
        auditor.run_staged(plan, cancel)
    });

    assert_eq!(report.result, SearchResult::Aborted);
    assert!(report.attempts < 200_000);
    // Hashing everything would take well over ten seconds.
    assert!(took < Duration::from_secs(3), "took {took:?}");
}

#[test]
fn interrupt_while_streaming_workers_are_hashing() {
    let auditor = slow_auditor();
    let mut reader = Endless { next: 0 };

    let (report, took) = interrupt_after(&auditor, Duration::from_millis(150), |cancel| {
        auditor.run_dictionary(&mut reader, cancel)
    });

    assert_eq!(report.result, SearchResult::Aborted);
    assert!(took < Duration::from_secs(3), "took {took:?}");
}

#[test]
fn pre_cancelled_run_reports_aborted_with_no_attempts() {
    let auditor = Auditor::from_hex("md5", &md5_hex("x"), settings(2)).unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();
    let plan = StagePlan::standard(auditor.settings(), &TargetProfile::default());

    let report = auditor.run_staged(plan, &cancel);

    assert_eq!(report.result, SearchResult::Aborted);
    assert_eq!(report.attempts, 0);
    assert!(report.stages.is_empty());
}

#[test]
fn standard_plan_cracks_a_short_numeric_pin() {
    let auditor = Auditor::from_hex("md5", &md5_hex("4821"), settings(4)).unwrap();
    let plan = StagePlan::standard(auditor.settings(), &TargetProfile::default());

    let report = auditor.run_staged(plan, &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("4821".into()));
    assert_eq!(report.stages.last().unwrap().name, "numeric-4");
}

#[test]
fn social_stage_uses_target_metadata() {
    let profile = TargetProfile {
        username: Some("jdoe".into()),
        ..TargetProfile::default()
    };
    let auditor = Auditor::from_hex("md5", &md5_hex("Jdoe123"), settings(2)).unwrap();
    let plan = StagePlan::standard(auditor.settings(), &profile);

    let report = auditor.run_staged(plan, &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("Jdoe123".into()));
    assert_eq!(report.stages.last().unwrap().name, "social");
}

#[test]
fn empty_dictionary_is_not_found() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let auditor = Auditor::from_hex("md5", &md5_hex("x"), settings(4)).unwrap();
    let mut reader = FileBatchReader::open(file.path()).unwrap();

    let report = auditor.run_dictionary(&mut reader, &CancelToken::new());

    assert_eq!(report.result, SearchResult::NotFound);
    assert_eq!(report.attempts, 0);
    assert_eq!(report.queue_high_water, Some(0));
}

#[test]
fn dictionary_skips_undecodable_lines_and_strips_terminators() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"alpha\r\nbeta\n\xff\xfe\n\nletmein\r\ngamma").unwrap();
    file.flush().unwrap();

    let auditor = Auditor::from_hex("md5", &md5_hex("letmein"), settings(2)).unwrap();
    let mut reader = FileBatchReader::open(file.path()).unwrap();

    let report = auditor.run_dictionary(&mut reader, &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("letmein".into()));
    assert_eq!(report.skipped_lines, 1);
}

#[test]
fn large_dictionary_counts_every_line() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..25_000 {
        writeln!(file, "word{i}").unwrap();
    }
    file.flush().unwrap();

    let auditor = Auditor::from_hex("md5", &md5_hex("absent"), settings(4)).unwrap();
    let mut reader = FileBatchReader::open(file.path()).unwrap();

    let report = auditor.run_dictionary(&mut reader, &CancelToken::new());

    assert_eq!(report.result, SearchResult::NotFound);
    assert_eq!(report.attempts, 25_000);
    assert!(report.queue_high_water.unwrap() <= auditor.settings().queue_capacity());
}

#[test]
fn hybrid_falls_through_to_the_dictionary() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "zebra\ncorrect-horse-battery").unwrap();
    file.flush().unwrap();

    let target = Sha256Algo.digest("correct-horse-battery").unwrap();
    let auditor = Auditor::from_hex("sha256", &target, settings(2)).unwrap();
    let mut reader = FileBatchReader::open(file.path()).unwrap();
    let plan = StagePlan::new().with(Stage::new("tiny", StaticList::from_strs(&["a", "b"])));

    let report = auditor.run_hybrid(plan, Some(&mut reader), &CancelToken::new());

    assert_eq!(report.result, SearchResult::Found("correct-horse-battery".into()));
    let names: Vec<_> = report.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["tiny", "adaptive", "dictionary"]);
    assert!(report.attempts > 2);
}

#[test]
fn configuration_errors_refuse_to_start() {
    assert!(matches!(
        Auditor::from_hex("whirlpool", &md5_hex("x"), settings(1)),
        Err(AuditError::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        Auditor::from_hex("sha256", &md5_hex("x"), settings(1)),
        Err(AuditError::InvalidDigest(_))
    ));
    assert!(matches!(
        Auditor::from_hex("md5", &"zz".repeat(16), settings(1)),
        Err(AuditError::InvalidDigest(_))
    ));
}

#[test]
fn report_serializes_to_json() {
    let auditor = Auditor::from_hex("md5", &md5_hex("b"), settings(1)).unwrap();
    let plan = StagePlan::new().with(Stage::new("s", StaticList::from_strs(&["a", "b"])));
    let report = auditor.run_staged(plan, &CancelToken::new());

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["result"]["status"], "found");
    assert_eq!(json["result"]["candidate"], "b");
    assert_eq!(json["attempts"], 2);
    assert!(json.get("queue_high_water").is_none());
}
