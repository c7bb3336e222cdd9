// src/cli/commands.rs
use crate::types::AlgorithmType;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hash Auditor CLI - password hash strength auditing
#[derive(Parser, Debug)]
#[command(name = "hash-auditor")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Staged smart search: likeliest guesses first
    Crack(CrackOptions),

    /// Stream candidates from a wordlist file
    Dictionary(DictionaryOptions),

    /// Staged search, then the wordlist if nothing was found
    Hybrid(HybridOptions),

    /// Measure raw digest throughput
    Benchmark(BenchmarkOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options every search command accepts
#[derive(Args, Debug, Clone)]
pub struct SearchOptions {
    /// Target digest, as hex
    pub hash: String,

    /// Digest algorithm (overrides config)
    #[arg(short = 'm', long = "method")]
    pub method: Option<AlgorithmType>,

    /// Number of worker threads (overrides config)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options shaping the staged candidate plan
#[derive(Args, Debug, Clone, Default)]
pub struct StagedOptions {
    /// Longest generated candidate (overrides config)
    #[arg(short = 'l', long)]
    pub max_length: Option<usize>,

    /// Target account user name
    #[arg(short, long)]
    pub username: Option<String>,

    /// Target account email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Target account holder's full name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Options for the staged search
#[derive(Parser, Debug)]
pub struct CrackOptions {
    /// Target and run options
    #[command(flatten)]
    pub search: SearchOptions,

    /// Staged plan options
    #[command(flatten)]
    pub staged: StagedOptions,
}

/// Options for dictionary search
#[derive(Parser, Debug)]
pub struct DictionaryOptions {
    /// Target and run options
    #[command(flatten)]
    pub search: SearchOptions,

    /// Newline-delimited wordlist
    pub file: PathBuf,

    /// Lines per batch (overrides config)
    #[arg(long)]
    pub chunk: Option<usize>,
}

/// Options for hybrid search
#[derive(Parser, Debug)]
pub struct HybridOptions {
    /// Target and run options
    #[command(flatten)]
    pub search: SearchOptions,

    /// Staged plan options
    #[command(flatten)]
    pub staged: StagedOptions,

    /// Wordlist tried after the staged search
    pub file: Option<PathBuf>,

    /// Lines per batch (overrides config)
    #[arg(long)]
    pub chunk: Option<usize>,
}

/// Options for digest benchmarks
#[derive(Parser, Debug)]
pub struct BenchmarkOptions {
    /// Algorithm to benchmark
    #[arg(short = 'm', long = "method", default_value = "md5")]
    pub algorithm: AlgorithmType,

    /// Duration of benchmark in seconds
    #[arg(short, long, default_value_t = 10)]
    pub duration: u64,

    /// Number of threads to use
    #[arg(short, long, default_value_t = num_cpus::get())]
    pub threads: usize,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,

    /// Include the `[target]` metadata table
    #[arg(long)]
    pub target: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definitions_are_consistent() {
        Commands::command().debug_assert();
    }

    #[test]
    fn crack_parses_overrides() {
        let cli = Commands::try_parse_from([
            "hash-auditor",
            "crack",
            "0d107d09f5bbe40cade3de5c71e9e9b7",
            "-m",
            "md5",
            "-l",
            "6",
            "-u",
            "jdoe",
            "--json",
        ])
        .unwrap();
        let Action::Crack(opts) = cli.action else {
            panic!("expected crack");
        };
        assert_eq!(opts.search.method, Some(AlgorithmType::Md5));
        assert_eq!(opts.staged.max_length, Some(6));
        assert_eq!(opts.staged.username.as_deref(), Some("jdoe"));
        assert!(opts.search.json);
    }

    #[test]
    fn hybrid_file_is_optional() {
        let cli = Commands::try_parse_from(["hash-auditor", "hybrid", "abc"]).unwrap();
        let Action::Hybrid(opts) = cli.action else {
            panic!("expected hybrid");
        };
        assert!(opts.file.is_none());
    }
}
