// src/config/config.rs
use crate::engine::candidates::TargetProfile;
use crate::engine::settings::{SearchSettings, default_workers};
use crate::types::AlgorithmType;
use crate::utils::error::AuditError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the auditor
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest algorithm ("md5", "sha1", "sha256")
    pub algorithm: String,

    /// Number of worker threads (0 = twice the CPU count, capped at 16)
    pub worker_threads: usize,

    /// Longest candidate the built-in stages generate
    pub max_length: usize,

    /// Comparisons a worker makes between shared counter updates
    pub flush_interval: u64,

    /// Rejected candidates remembered for the adaptive stage
    pub rejected_capacity: usize,

    /// Largest space enumerated in full before sampling kicks in
    pub sample_ceiling: usize,

    /// Candidates pulled from a stage per dispatch
    pub stage_batch_size: usize,

    /// Lines per dictionary batch
    pub dictionary_batch_size: usize,

    /// Streaming queue capacity, in batches per worker
    pub queue_factor: usize,

    /// Cap on adaptive candidates
    pub adaptive_limit: usize,

    /// Seconds between progress lines
    pub report_interval_secs: u64,

    /// What is known about the account holder
    pub target: TargetProfile,
}

impl Default for Config {
    fn default() -> Self {
        let engine = SearchSettings::default();
        Config {
            algorithm: "md5".into(),
            worker_threads: 0,
            max_length: engine.max_length,
            flush_interval: engine.flush_interval,
            rejected_capacity: engine.rejected_capacity,
            sample_ceiling: engine.sample_ceiling,
            stage_batch_size: engine.stage_batch_size,
            dictionary_batch_size: engine.dictionary_batch_size,
            queue_factor: engine.queue_factor,
            adaptive_limit: engine.adaptive_limit,
            report_interval_secs: 5,
            target: TargetProfile::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AuditError)` - If file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AuditError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            AuditError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_str)
    }

    /// Parses configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, AuditError> {
        toml::from_str(text)
            .map_err(|e| AuditError::ConfigError(format!("Invalid config format: {}", e)))
    }

    /// Loads `path` if given, otherwise returns the defaults
    pub fn load_or_default(path: Option<&PathBuf>) -> Result<Self, AuditError> {
        match path {
            Some(path) => Self::load(path.clone()),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the configured algorithm name
    pub fn algorithm_type(&self) -> Result<AlgorithmType, AuditError> {
        self.algorithm.parse()
    }

    /// Engine tunables with `worker_threads = 0` resolved
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            workers: if self.worker_threads == 0 {
                default_workers()
            } else {
                self.worker_threads
            },
            max_length: self.max_length,
            flush_interval: self.flush_interval.max(1),
            rejected_capacity: self.rejected_capacity,
            sample_ceiling: self.sample_ceiling,
            stage_batch_size: self.stage_batch_size.max(1),
            dictionary_batch_size: self.dictionary_batch_size.max(1),
            queue_factor: self.queue_factor.max(1),
            adaptive_limit: self.adaptive_limit,
        }
    }

    /// Interval between progress reports
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs.max(1))
    }

    /// Generates a configuration template string
    ///
    /// # Arguments
    /// * `with_target` - Include the commented `[target]` table
    ///
    /// # Returns
    /// String containing a commented TOML configuration template
    pub fn generate_template(with_target: bool) -> String {
        let mut template = String::new();
        template.push_str("# Hash Auditor Configuration\n\n");
        template.push_str("# Supported algorithms: md5, sha1, sha256\n");
        template.push_str("algorithm = \"md5\"\n");
        template.push_str("# Number of worker threads (0 = auto-detect)\n");
        template.push_str("worker_threads = 0\n");
        template.push_str("# Longest generated candidate\n");
        template.push_str("max_length = 8\n");
        template.push_str("# Comparisons between shared counter updates\n");
        template.push_str("flush_interval = 1000\n");
        template.push_str("# Failed guesses kept for adaptive mutation\n");
        template.push_str("rejected_capacity = 10000\n");
        template.push_str("# Spaces larger than this are sampled, not enumerated\n");
        template.push_str("sample_ceiling = 500000\n");
        template.push_str("stage_batch_size = 100000\n");
        template.push_str("dictionary_batch_size = 10000\n");
        template.push_str("# Queue capacity = workers * queue_factor batches\n");
        template.push_str("queue_factor = 2\n");
        template.push_str("adaptive_limit = 200000\n");
        template.push_str("report_interval_secs = 5\n");

        if with_target {
            template.push_str("\n# Known account metadata for the social stage\n");
            template.push_str("[target]\n");
            template.push_str("username = \"jdoe\"\n");
            template.push_str("email = \"john.doe@example.com\"\n");
            template.push_str("name = \"John Doe\"\n");
        }

        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn template_round_trips() {
        let config = Config::from_toml(&Config::generate_template(true)).unwrap();
        assert_eq!(config.algorithm_type().unwrap(), AlgorithmType::Md5);
        assert_eq!(config.target.username.as_deref(), Some("jdoe"));
        assert_eq!(config.rejected_capacity, 10_000);
    }

    #[test]
    fn zero_workers_resolves_to_auto() {
        let settings = Config::default().search_settings();
        assert!(settings.workers >= 1 && settings.workers <= 16);

        let pinned = Config {
            worker_threads: 3,
            ..Config::default()
        };
        assert_eq!(pinned.search_settings().workers, 3);
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let config = Config::from_toml("algorithm = \"crc32\"").unwrap();
        assert!(matches!(
            config.algorithm_type(),
            Err(AuditError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        assert!(matches!(
            Config::from_toml("worker_threads = \"many\""),
            Err(AuditError::ConfigError(_))
        ));
    }
}
