// src/engine/report.rs
//! Terminal values handed back to callers and reporters

use crate::types::Candidate;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Outcome of one search invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "candidate", rename_all = "snake_case")]
pub enum SearchResult {
    /// Every stage was exhausted without a match
    NotFound,
    /// A candidate whose digest equals the target
    Found(Candidate),
    /// Interrupted externally before any match was claimed
    Aborted,
}

impl SearchResult {
    /// Whether a match was found
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

/// What one stage contributed to a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    /// Stage name
    pub name: String,
    /// Candidates dispatched to workers (not necessarily all hashed)
    pub dispatched: u64,
}

/// Final result plus counters for the reporting layer
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// Terminal result
    pub result: SearchResult,
    /// Candidates actually hashed and compared
    pub attempts: u64,
    /// Wall-clock time of the run
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
    /// Stages entered, in order
    pub stages: Vec<StageSummary>,
    /// Deepest the streaming queue got, in batches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_high_water: Option<usize>,
    /// Dictionary lines skipped because they were not valid UTF-8
    pub skipped_lines: u64,
}

impl SearchReport {
    /// Average hashes per second over the run
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempts as f64 / secs
        } else {
            0.0
        }
    }

    /// Combines two consecutive runs sharing one target (hybrid mode)
    ///
    /// The later run's result wins unless the earlier one already found
    /// the candidate.
    pub fn chain(self, next: SearchReport) -> SearchReport {
        let result = if self.result.is_found() {
            self.result
        } else {
            next.result
        };
        let mut stages = self.stages;
        stages.extend(next.stages);
        SearchReport {
            result,
            attempts: self.attempts + next.attempts,
            elapsed: self.elapsed + next.elapsed,
            stages,
            queue_high_water: next.queue_high_water.or(self.queue_high_water),
            skipped_lines: self.skipped_lines + next.skipped_lines,
        }
    }
}

fn as_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged_result() {
        let report = SearchReport {
            result: SearchResult::Found("letmein".into()),
            attempts: 5,
            elapsed: Duration::from_millis(1500),
            stages: vec![StageSummary {
                name: "ultra-high".into(),
                dispatched: 20,
            }],
            queue_high_water: None,
            skipped_lines: 0,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["status"], "found");
        assert_eq!(json["result"]["candidate"], "letmein");
        assert_eq!(json["elapsed"], 1.5);
        assert!(json.get("queue_high_water").is_none());
    }
}
