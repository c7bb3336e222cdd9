// src/engine/candidates/curated.rs
//! Curated guesses ranked into priority tiers
//!
//! Tiers are built together so a candidate appears only in the highest tier
//! that produces it. Anything longer than the configured maximum length is
//! dropped.

use crate::types::Candidate;
use std::collections::HashSet;

/// Most frequently leaked passwords, most common first
const TOP_PASSWORDS: &[&str] = &[
    "123456", "password", "123456789", "12345678", "12345", "1234567",
    "1234567890", "qwerty", "abc123", "111111", "123123", "admin",
    "letmein", "welcome", "monkey", "1234", "dragon", "master", "hello",
    "login", "princess", "qwertyuiop", "solo", "starwars", "iloveyou",
    "sunshine", "football", "baseball", "000000", "password1", "654321",
    "superman", "trustno1", "passw0rd", "shadow", "michael", "666666",
    "121212", "qazwsx", "access", "flower", "mustang", "batman",
];

/// Base words that users decorate with digits and symbols
const COMMON_WORDS: &[&str] = &[
    "password", "admin", "user", "login", "welcome", "qwerty", "facebook",
    "google", "apple", "microsoft", "amazon", "netflix", "instagram",
    "twitter", "youtube", "love", "family", "friend", "home", "work",
    "school", "john", "mike", "david", "chris", "alex", "sarah", "emma",
    "lisa", "secret", "private", "secure", "account", "summer", "winter",
];

/// Digit and symbol tails seen most often after a base word
const COMMON_SUFFIXES: &[&str] = &[
    "1", "12", "123", "1234", "12345", "!", "@", "#", "01", "00", "99",
    "007", "2023", "2024", "2025",
];

const COMMON_PREFIXES: &[&str] = &[
    "my", "the", "new", "big", "super", "best", "top", "first",
];

const SYMBOLS: &[&str] = &["!", "@", "#", "$", "%", "*", "?", "."];

/// Keyboard walks and repeated patterns
const PATTERNS: &[&str] = &[
    "qwe123", "asdf", "asdfgh", "zxcvbn", "1q2w3e", "1q2w3e4r", "q1w2e3r4",
    "aaaaaa", "abcdef", "abcd1234", "112233", "123321", "147258", "159753",
    "987654", "7777777", "1qaz2wsx",
];

/// Candidate lists for the curated stages
#[derive(Debug, Clone, Default)]
pub struct CuratedTiers {
    /// Top leaked passwords
    pub ultra_high: Vec<Candidate>,
    /// Common words with short numeric or symbol tails
    pub high: Vec<Candidate>,
    /// Years, keyboard walks and capitalized variants
    pub medium: Vec<Candidate>,
    /// Prefix/word/symbol combinations
    pub low: Vec<Candidate>,
}

impl CuratedTiers {
    /// Builds all tiers, keeping candidates of at most `max_length` chars
    pub fn build(max_length: usize) -> Self {
        let mut tiers = Tiering::new(max_length);

        let ultra_high = tiers.take(TOP_PASSWORDS.iter().map(|s| s.to_string()));

        let high = tiers.take(COMMON_WORDS.iter().flat_map(|word| {
            std::iter::once(word.to_string())
                .chain(COMMON_SUFFIXES.iter().map(move |suffix| format!("{word}{suffix}")))
        }));

        let medium = tiers.take(
            COMMON_WORDS
                .iter()
                .flat_map(|word| {
                    let cap = capitalize(word);
                    (1970..=2025)
                        .map(move |year| format!("{word}{year}"))
                        .chain(COMMON_SUFFIXES.iter().map(move |s| format!("{cap}{s}")))
                })
                .chain(PATTERNS.iter().map(|s| s.to_string()))
                .chain((1950..=2025).map(|year| year.to_string())),
        );

        let prefixed = COMMON_PREFIXES.iter().flat_map(|prefix| {
            COMMON_WORDS.iter().flat_map(move |word| {
                std::iter::once(format!("{prefix}{word}"))
                    .chain(SYMBOLS.iter().map(move |symbol| format!("{prefix}{word}{symbol}")))
            })
        });
        let decorated = COMMON_WORDS.iter().flat_map(|word| {
            let cap = capitalize(word);
            SYMBOLS.iter().flat_map(move |symbol| {
                let cap = cap.clone();
                COMMON_SUFFIXES
                    .iter()
                    .map(move |suffix| format!("{cap}{suffix}{symbol}"))
            })
        });
        let low = tiers.take(prefixed.chain(decorated));

        CuratedTiers {
            ultra_high,
            high,
            medium,
            low,
        }
    }
}

struct Tiering {
    max_length: usize,
    seen: HashSet<Candidate>,
}

impl Tiering {
    fn new(max_length: usize) -> Self {
        Tiering {
            max_length,
            seen: HashSet::new(),
        }
    }

    fn take(&mut self, candidates: impl Iterator<Item = Candidate>) -> Vec<Candidate> {
        let max_length = self.max_length;
        let seen = &mut self.seen;
        candidates
            .filter(|c| !c.is_empty() && c.chars().count() <= max_length)
            .filter(|c| seen.insert(c.clone()))
            .collect()
    }
}

/// Uppercases the first character
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
