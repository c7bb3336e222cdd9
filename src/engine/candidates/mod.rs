// src/engine/candidates/mod.rs
//! Candidate generation policies
//!
//! Every stage pulls its candidates from a [`CandidateSource`]. Sources are
//! finite and handed out in batches so even enormous combinatorial spaces
//! never have to be materialized at once.

/// Curated high-probability lists, ranked into tiers
pub mod curated;

/// Candidates seeded from target metadata
pub mod social;

/// Exhaustive enumeration of fixed-length strings
pub mod combinatorial;

/// Bounded heuristic sampling of large combinatorial spaces
pub mod sampled;

/// Mutations of previously rejected candidates
pub mod adaptive;

/// Streaming batches from newline-delimited files
pub mod dictionary;

use crate::types::Candidate;

pub use self::adaptive::AdaptiveSource;
pub use self::combinatorial::Combinatorial;
pub use self::curated::CuratedTiers;
pub use self::dictionary::{BatchReader, FileBatchReader};
pub use self::sampled::SampledCombinatorial;
pub use self::social::TargetProfile;

/// Lowercase ASCII letters
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// ASCII digits
pub const DIGITS: &str = "0123456789";

/// Produces the candidates of one stage
pub trait CandidateSource: Send {
    /// Returns up to `max` further candidates, or `None` once the stage is
    /// exhausted
    fn next_batch(&mut self, max: usize) -> Option<Vec<Candidate>>;
}

/// An explicit, already-ranked list of candidates
#[derive(Debug, Clone, Default)]
pub struct StaticList {
    items: Vec<Candidate>,
    position: usize,
}

impl StaticList {
    /// Wraps a ranked list; order is preserved
    pub fn new(items: Vec<Candidate>) -> Self {
        StaticList { items, position: 0 }
    }

    /// Builds a list from string literals
    pub fn from_strs(items: &[&str]) -> Self {
        Self::new(items.iter().map(|s| s.to_string()).collect())
    }

    /// Total number of candidates in the list
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no candidates
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CandidateSource for StaticList {
    fn next_batch(&mut self, max: usize) -> Option<Vec<Candidate>> {
        if self.position >= self.items.len() {
            return None;
        }
        let end = self.position.saturating_add(max.max(1)).min(self.items.len());
        let batch = self.items[self.position..end].to_vec();
        self.position = end;
        Some(batch)
    }
}

/// `alphabet.len() ^ length`, or `None` if it overflows
pub fn space_size(alphabet_len: usize, length: usize) -> Option<u64> {
    let length = u32::try_from(length).ok()?;
    (alphabet_len as u64).checked_pow(length)
}
