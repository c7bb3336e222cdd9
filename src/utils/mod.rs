// src/utils/mod.rs
//! Shared utilities: the crate error type and logging setup.

/// Error types and conversions
///
/// Contains [`AuditError`], the single error enum used across the crate.
pub mod error;

/// Logging initialization
pub mod logging;

pub use error::AuditError;
pub use logging::init_logging;
