// src/engine/stage.rs
//! Named priority tiers and the order they run in

use crate::engine::candidates::{
    CandidateSource, Combinatorial, CuratedTiers, DIGITS, LOWERCASE, SampledCombinatorial,
    StaticList, TargetProfile, space_size,
};
use crate::engine::settings::SearchSettings;
use std::fmt;

/// Where a stage's candidates come from
pub enum StageKind {
    /// A source fixed when the plan is built
    Source(Box<dyn CandidateSource>),
    /// Derived from the run's rejected buffer when the stage starts
    Adaptive,
}

/// One ordered phase of the search
pub struct Stage {
    name: String,
    kind: StageKind,
}

impl Stage {
    /// A stage backed by a fixed source
    pub fn new(name: impl Into<String>, source: impl CandidateSource + 'static) -> Self {
        Stage {
            name: name.into(),
            kind: StageKind::Source(Box::new(source)),
        }
    }

    /// The adaptive feedback stage
    pub fn adaptive() -> Self {
        Stage {
            name: "adaptive".to_string(),
            kind: StageKind::Adaptive,
        }
    }

    /// Stage name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the adaptive stage
    pub fn is_adaptive(&self) -> bool {
        matches!(self.kind, StageKind::Adaptive)
    }

    pub(crate) fn into_parts(self) -> (String, StageKind) {
        (self.name, self.kind)
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("adaptive", &self.is_adaptive())
            .finish()
    }
}

/// Totally ordered list of stages
///
/// If no adaptive stage is present, one is appended when the plan runs, so
/// feedback is always attempted once after the configured stages.
#[derive(Debug, Default)]
pub struct StagePlan {
    stages: Vec<Stage>,
}

impl StagePlan {
    /// Empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage
    pub fn push(&mut self, stage: Stage) -> &mut Self {
        self.stages.push(stage);
        self
    }

    /// Builder-style append
    pub fn with(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Number of stages, excluding any implicit adaptive stage
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the plan has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in run order
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Final stage list with the adaptive stage guaranteed present
    pub fn into_stages(mut self) -> Vec<Stage> {
        if !self.stages.iter().any(Stage::is_adaptive) {
            self.stages.push(Stage::adaptive());
        }
        self.stages
    }

    /// The default plan, cheapest and likeliest guesses first:
    ///
    /// ultra-high, social, high, medium, numeric-4..8, alnum-3..6,
    /// adaptive, low.
    pub fn standard(settings: &SearchSettings, profile: &TargetProfile) -> Self {
        let max_length = settings.max_length;
        let tiers = CuratedTiers::build(max_length);
        let mut plan = StagePlan::new();

        plan.push(Stage::new("ultra-high", StaticList::new(tiers.ultra_high)));
        let social = profile.candidates(max_length);
        if !social.is_empty() {
            plan.push(Stage::new("social", StaticList::new(social)));
        }
        plan.push(Stage::new("high", StaticList::new(tiers.high)));
        plan.push(Stage::new("medium", StaticList::new(tiers.medium)));

        for length in 4..=max_length.min(8) {
            plan.push(Stage::new(
                format!("numeric-{length}"),
                Combinatorial::new(DIGITS, length),
            ));
        }

        let alnum = format!("{LOWERCASE}{DIGITS}");
        for length in 3..=max_length.min(6) {
            let name = format!("alnum-{length}");
            let fits = space_size(alnum.len(), length)
                .is_some_and(|space| space <= settings.sample_ceiling as u64);
            if fits {
                plan.push(Stage::new(name, Combinatorial::new(&alnum, length)));
            } else {
                plan.push(Stage::new(
                    name,
                    SampledCombinatorial::new(&alnum, length, settings.sample_ceiling),
                ));
            }
        }

        plan.push(Stage::adaptive());
        plan.push(Stage::new("low", StaticList::new(tiers.low)));
        plan
    }
}
