// src/utils/error.rs
use crate::engine::stream::WorkItem;
use serde_json;
use std::io;
use thiserror::Error;

/// Main error type for the auditor
///
/// Only configuration-time variants are fatal to a run. Per-candidate and
/// per-worker variants are recovered locally by the engine and surface
/// only in logs.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The requested digest algorithm is not supported
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The target digest is not valid hex of the right width
    #[error("Invalid target digest: {0}")]
    InvalidDigest(String),

    /// A candidate could not be encoded for hashing
    #[error("Candidate encoding error: {0}")]
    CandidateEncoding(String),

    /// A worker failed unexpectedly
    #[error("Worker internal error: {0}")]
    WorkerInternal(String),

    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Thread communication channel errors
    #[error("Thread communication error: {0}")]
    ChannelError(String),

    /// Async task execution errors
    #[error("Task execution error: {0}")]
    TaskError(String),
}

/// Converts crossbeam send errors on the streaming queue into AuditError
///
/// Raised when every streaming worker has gone away before the producer
/// finished handing out batches.
impl From<crossbeam_channel::SendError<WorkItem>> for AuditError {
    fn from(_: crossbeam_channel::SendError<WorkItem>) -> Self {
        AuditError::ChannelError("Batch queue disconnected".to_string())
    }
}

/// Converts rayon pool construction failures into AuditError
impl From<rayon::ThreadPoolBuildError> for AuditError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        AuditError::ConfigError(format!("Failed to build worker pool: {}", e))
    }
}

/// Converts hex decoding errors into AuditError
///
/// Only the target digest is ever hex-decoded, so this is always an
/// input problem.
impl From<hex::FromHexError> for AuditError {
    fn from(e: hex::FromHexError) -> Self {
        AuditError::InvalidDigest(format!("Hex conversion failed: {}", e))
    }
}

/// Converts async task join errors into AuditError
impl From<tokio::task::JoinError> for AuditError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuditError::TaskError(format!("Search task failed: {}", e))
    }
}
