// src/engine/candidates/sampled.rs
//! Bounded sampling of combinatorial spaces too large to enumerate
//!
//! Two parts, filling exactly `ceiling` candidates when the space is larger:
//! 1. structured guesses shaped like `letters` followed by `digits`, the
//!    most common human shape;
//! 2. uniform random fill drawn without replacement from the whole space.
//!
//! Output is not seeded and differs between runs.

use crate::engine::candidates::{
    CandidateSource, Combinatorial, DIGITS, LOWERCASE, StaticList, space_size,
};
use crate::types::Candidate;
use rand::Rng;
use rand::seq::index;
use std::collections::HashSet;

/// Upper bound on structured guesses per letters/digits split
const STRUCTURED_PER_SPLIT: usize = 10_000;

/// Heuristic sample of `alphabet^length`, materialized on first use
pub struct SampledCombinatorial {
    alphabet: Vec<char>,
    length: usize,
    ceiling: usize,
    generated: Option<StaticList>,
}

impl SampledCombinatorial {
    /// Creates a sampler yielding at most `ceiling` candidates
    ///
    /// Repeated alphabet characters are dropped.
    pub fn new(alphabet: &str, length: usize, ceiling: usize) -> Self {
        let mut distinct = Vec::new();
        for ch in alphabet.chars() {
            if !distinct.contains(&ch) {
                distinct.push(ch);
            }
        }
        SampledCombinatorial {
            alphabet: distinct,
            length,
            ceiling,
            generated: None,
        }
    }

    /// Builds the full candidate set
    pub fn generate(&self) -> Vec<Candidate> {
        let alphabet: String = self.alphabet.iter().collect();
        let space = space_size(self.alphabet.len(), self.length);

        // Small spaces are simply enumerated.
        if let Some(space) = space {
            if space <= self.ceiling as u64 {
                return Combinatorial::new(&alphabet, self.length).collect();
            }
        }

        let mut rng = rand::thread_rng();
        let mut seen = HashSet::with_capacity(self.ceiling);
        let mut out = Vec::with_capacity(self.ceiling);

        for candidate in self.structured(&mut rng) {
            if out.len() >= self.ceiling {
                break;
            }
            if seen.insert(candidate.clone()) {
                out.push(candidate);
            }
        }

        // Random draws may land on structured guesses already taken, so top
        // up until the ceiling is met. The space exceeds the ceiling here.
        while out.len() < self.ceiling {
            let shortfall = self.ceiling - out.len();
            for candidate in self.random_fill(&mut rng, space, shortfall) {
                if seen.insert(candidate.clone()) {
                    out.push(candidate);
                }
            }
        }
        out
    }

    /// Letters-then-digits guesses for every split point
    fn structured(&self, rng: &mut impl Rng) -> Vec<Candidate> {
        let letters: Vec<char> = LOWERCASE.chars().filter(|c| self.alphabet.contains(c)).collect();
        let digits: Vec<char> = DIGITS.chars().filter(|c| self.alphabet.contains(c)).collect();
        if letters.is_empty() || digits.is_empty() {
            return Vec::new();
        }

        let per_split = STRUCTURED_PER_SPLIT.min(self.ceiling / 4);
        let mut out = Vec::new();
        for letter_len in 1..self.length {
            let digit_len = self.length - letter_len;
            for _ in 0..per_split {
                let mut candidate = String::with_capacity(self.length);
                candidate.extend((0..letter_len).map(|_| letters[rng.gen_range(0..letters.len())]));
                candidate.extend((0..digit_len).map(|_| digits[rng.gen_range(0..digits.len())]));
                out.push(candidate);
            }
        }
        out
    }

    /// Distinct uniformly random members of the space
    fn random_fill(&self, rng: &mut impl Rng, space: Option<u64>, amount: usize) -> Vec<Candidate> {
        match space.and_then(|s| usize::try_from(s).ok()) {
            Some(space) => index::sample(rng, space, amount.min(space))
                .into_iter()
                .map(|i| self.decode(i as u64))
                .collect(),
            // Beyond usize the space dwarfs any ceiling; rejection on
            // duplicates converges immediately.
            None => {
                let mut picked = HashSet::with_capacity(amount);
                while picked.len() < amount {
                    let candidate: String = (0..self.length)
                        .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())])
                        .collect();
                    picked.insert(candidate);
                }
                picked.into_iter().collect()
            }
        }
    }

    /// Maps an index in `0..space` to its string (base-`alphabet` digits)
    fn decode(&self, mut index: u64) -> Candidate {
        let base = self.alphabet.len() as u64;
        let mut chars = vec![self.alphabet[0]; self.length];
        for slot in chars.iter_mut().rev() {
            *slot = self.alphabet[(index % base) as usize];
            index /= base;
        }
        chars.into_iter().collect()
    }
}

impl CandidateSource for SampledCombinatorial {
    fn next_batch(&mut self, max: usize) -> Option<Vec<Candidate>> {
        if self.alphabet.is_empty() || self.ceiling == 0 {
            return None;
        }
        if self.generated.is_none() {
            self.generated = Some(StaticList::new(self.generate()));
        }
        self.generated.as_mut().and_then(|list| list.next_batch(max))
    }
}
