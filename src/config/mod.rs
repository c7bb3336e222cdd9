// src/config/mod.rs
//! Configuration management for the auditor
//!
//! Configuration is TOML. Every key is optional; command-line flags
//! override whatever the file sets.

/// Core configuration implementation
pub mod config;

// Re-export key items for easy access
pub use config::Config;

use crate::utils::error::AuditError;
use std::path::PathBuf;

/// Loads configuration from a TOML file, or the defaults when no path is
/// given
pub fn load(path: Option<&PathBuf>) -> Result<Config, AuditError> {
    Config::load_or_default(path)
}

/// Generates a commented configuration template
///
/// # Arguments
/// * `with_target` - Whether to include the `[target]` metadata table
pub fn generate_template(with_target: bool) -> String {
    Config::generate_template(with_target)
}
