// src/engine/candidates/social.rs
//! Guesses derived from what is known about the account holder

use crate::engine::candidates::curated::capitalize;
use crate::types::Candidate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SOCIAL_SUFFIXES: &[&str] = &[
    "1", "12", "123", "1234", "!", "@", "01", "007", "2023", "2024", "2025",
];

/// Optional metadata about the target account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetProfile {
    /// Account user name
    #[serde(default)]
    pub username: Option<String>,
    /// Account email address
    #[serde(default)]
    pub email: Option<String>,
    /// Full name of the holder
    #[serde(default)]
    pub name: Option<String>,
}

impl TargetProfile {
    /// Whether no metadata was supplied
    pub fn is_empty(&self) -> bool {
        self.seeds().is_empty()
    }

    /// Distinct lowercase base words extracted from the metadata
    pub fn seeds(&self) -> Vec<String> {
        let mut raw = Vec::new();
        if let Some(username) = &self.username {
            raw.push(username.clone());
        }
        if let Some(email) = &self.email {
            let local = email.split('@').next().unwrap_or_default();
            raw.push(local.to_string());
            raw.extend(local.split(['.', '_', '-']).map(str::to_string));
        }
        if let Some(name) = &self.name {
            let parts: Vec<&str> = name.split_whitespace().collect();
            raw.extend(parts.iter().map(|p| p.to_string()));
            if parts.len() > 1 {
                raw.push(parts.concat());
            }
        }

        let mut seen = HashSet::new();
        raw.into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect()
    }

    /// Seeds crossed with case variants, common tails and birth years
    pub fn candidates(&self, max_length: usize) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |candidate: String| {
            if candidate.chars().count() <= max_length && seen.insert(candidate.clone()) {
                out.push(candidate);
            }
        };

        let seeds = self.seeds();
        for seed in &seeds {
            let variants = [seed.clone(), capitalize(seed), seed.to_uppercase()];
            for variant in &variants {
                push(variant.clone());
            }
            for variant in &variants[..2] {
                for suffix in SOCIAL_SUFFIXES {
                    push(format!("{variant}{suffix}"));
                }
            }
        }
        for seed in &seeds {
            for year in 1960..=2025 {
                push(format!("{seed}{year}"));
                push(format!("{seed}{:02}", year % 100));
            }
        }
        out
    }
}
