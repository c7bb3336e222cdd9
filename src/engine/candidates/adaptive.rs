// src/engine/candidates/adaptive.rs
//! Follow-up guesses derived from candidates that already failed
//!
//! A human-chosen secret close to a common guess is likelier than a random
//! string, so each rejected candidate is mutated with look-alike symbol
//! substitutions, case changes and common prefixes/suffixes. The exact
//! output set is a heuristic and may change freely.

use crate::engine::candidates::curated::capitalize;
use crate::engine::candidates::{CandidateSource, StaticList};
use crate::types::Candidate;
use rayon::prelude::*;
use std::collections::HashSet;

/// Look-alike substitutions, first entry per letter is the primary one
const SUBSTITUTIONS: &[(char, &[char])] = &[
    ('a', &['@', '4']),
    ('e', &['3']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['7']),
    ('l', &['1']),
];

const AFFIX_SUFFIXES: &[&str] = &["1", "12", "123", "!", "@", "#", "01", "2024", "2025"];
const AFFIX_PREFIXES: &[&str] = &["my", "the", "1"];

/// Mutations of rejected candidates, generated on first use
pub struct AdaptiveSource {
    rejected: Vec<Candidate>,
    limit: usize,
    max_length: usize,
    generated: Option<StaticList>,
}

impl AdaptiveSource {
    /// Creates a source over a snapshot of the rejected buffer
    ///
    /// At most `limit` candidates of at most `max_length` chars are produced.
    pub fn new(rejected: Vec<Candidate>, limit: usize, max_length: usize) -> Self {
        AdaptiveSource {
            rejected,
            limit,
            max_length,
            generated: None,
        }
    }

    /// Builds the deduplicated mutation set
    ///
    /// Rejected inputs themselves are never repeated.
    pub fn generate(&self) -> Vec<Candidate> {
        let max_length = self.max_length;
        let mutated: Vec<Vec<Candidate>> = self
            .rejected
            .par_iter()
            .map(|word| {
                mutations(word)
                    .into_iter()
                    .filter(|m| m.chars().count() <= max_length)
                    .collect()
            })
            .collect();

        let mut seen: HashSet<&str> = self.rejected.iter().map(String::as_str).collect();
        let mut out = Vec::new();
        // Round-robin across inputs so every rejected word contributes
        // its best mutations before anyone's tail.
        let deepest = mutated.iter().map(Vec::len).max().unwrap_or(0);
        'fill: for depth in 0..deepest {
            for variants in &mutated {
                if let Some(candidate) = variants.get(depth) {
                    if out.len() >= self.limit {
                        break 'fill;
                    }
                    if seen.insert(candidate.as_str()) {
                        out.push(candidate.clone());
                    }
                }
            }
        }
        out
    }
}

impl CandidateSource for AdaptiveSource {
    fn next_batch(&mut self, max: usize) -> Option<Vec<Candidate>> {
        if self.rejected.is_empty() || self.limit == 0 {
            return None;
        }
        if self.generated.is_none() {
            self.generated = Some(StaticList::new(self.generate()));
        }
        self.generated.as_mut().and_then(|list| list.next_batch(max))
    }
}

/// All mutations of one word, most plausible first
pub fn mutations(word: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    let lower = word.to_lowercase();

    out.push(capitalize(&lower));
    out.push(word.to_uppercase());
    out.push(lower.clone());
    out.push(substitute(&lower, 0));
    out.push(capitalize(&substitute(&lower, 0)));
    out.push(substitute(&lower, 1));
    for suffix in AFFIX_SUFFIXES {
        out.push(format!("{word}{suffix}"));
    }
    for suffix in AFFIX_SUFFIXES {
        out.push(format!("{}{suffix}", capitalize(&lower)));
    }
    for prefix in AFFIX_PREFIXES {
        out.push(format!("{prefix}{word}"));
    }
    out.push(format!("{}!", substitute(&lower, 0)));
    out.push(lower.chars().rev().collect());

    out.retain(|m| m != word);
    out
}

/// Replaces every substitutable letter using the `choice`-th look-alike
/// (falling back to the primary one)
fn substitute(word: &str, choice: usize) -> String {
    word.chars()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to.get(choice).unwrap_or(&to[0]))
                .unwrap_or(c)
        })
        .collect()
}
