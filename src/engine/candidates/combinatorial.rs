// src/engine/candidates/combinatorial.rs
//! Lazy enumeration of every string of one length over an alphabet

use crate::engine::candidates::{CandidateSource, space_size};
use crate::types::Candidate;

/// All `alphabet^length` strings in lexicographic alphabet order
///
/// Only the current odometer position is kept in memory, so spaces in the
/// hundreds of millions are fine. [`Combinatorial::reset`] restarts the
/// sequence.
#[derive(Debug, Clone)]
pub struct Combinatorial {
    alphabet: Vec<char>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinatorial {
    /// Creates the sequence; an empty alphabet yields nothing
    pub fn new(alphabet: &str, length: usize) -> Self {
        let alphabet: Vec<char> = alphabet.chars().collect();
        let exhausted = alphabet.is_empty();
        Combinatorial {
            indices: vec![0; length],
            alphabet,
            exhausted,
        }
    }

    /// Total number of strings, if it fits in `u64`
    pub fn len(&self) -> Option<u64> {
        if self.alphabet.is_empty() {
            return Some(0);
        }
        space_size(self.alphabet.len(), self.indices.len())
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Restarts from the first string
    pub fn reset(&mut self) {
        self.indices.iter_mut().for_each(|i| *i = 0);
        self.exhausted = self.alphabet.is_empty();
    }

    fn current(&self) -> Candidate {
        self.indices.iter().map(|&i| self.alphabet[i]).collect()
    }

    // Rightmost position moves fastest.
    fn advance(&mut self) {
        for slot in self.indices.iter_mut().rev() {
            *slot += 1;
            if *slot < self.alphabet.len() {
                return;
            }
            *slot = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Combinatorial {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.exhausted {
            return None;
        }
        let candidate = self.current();
        self.advance();
        Some(candidate)
    }
}

impl CandidateSource for Combinatorial {
    fn next_batch(&mut self, max: usize) -> Option<Vec<Candidate>> {
        let batch: Vec<Candidate> = self.by_ref().take(max.max(1)).collect();
        if batch.is_empty() { None } else { Some(batch) }
    }
}
