//! Command-line interface definitions

/// clap derive definitions for every subcommand
pub mod commands;

pub use commands::{
    Action, BenchmarkOptions, Commands, ConfigOptions, CrackOptions, DictionaryOptions,
    HybridOptions, SearchOptions, StagedOptions,
};
