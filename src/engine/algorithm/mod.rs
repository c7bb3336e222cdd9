// src/engine/algorithm/mod.rs
//! Digest algorithm implementations
//!
//! The engine treats hashing as a pluggable oracle: anything implementing
//! [`Algorithm`] can be searched against. Built-in implementations:
//! - MD5
//! - SHA-1 and SHA-256

/// MD5 implementation
pub mod md5;

/// SHA family implementations
pub mod sha;

use crate::types::AlgorithmType;
use crate::utils::error::AuditError;
use std::sync::Arc;

pub use self::md5::Md5Algo;
pub use self::sha::{Sha1Algo, Sha256Algo};

/// Common interface for all digest oracles
///
/// Implementations must be pure and deterministic; the same instance is
/// shared by every worker thread of a run.
pub trait Algorithm: Send + Sync {
    /// Compute the raw digest of a candidate's bytes
    ///
    /// An `Err` marks this one candidate as unhashable. The engine skips it
    /// and keeps going.
    fn hash(&self, candidate: &[u8]) -> Result<Vec<u8>, AuditError>;

    /// Compute the lowercase hex digest of a candidate
    fn digest(&self, candidate: &str) -> Result<String, AuditError> {
        self.hash(candidate.as_bytes()).map(hex::encode)
    }

    /// Get the algorithm type
    fn algorithm_type(&self) -> AlgorithmType;
}

/// Builds the oracle for an algorithm tag
pub fn create_algorithm(algorithm: AlgorithmType) -> Arc<dyn Algorithm> {
    match algorithm {
        AlgorithmType::Md5 => Arc::new(Md5Algo),
        AlgorithmType::Sha1 => Arc::new(Sha1Algo),
        AlgorithmType::Sha256 => Arc::new(Sha256Algo),
    }
}

/// Resolves an algorithm name from configuration into an oracle
///
/// This is the configuration-time gate: an unknown name fails with
/// [`AuditError::UnsupportedAlgorithm`] before any search starts.
pub fn algorithm_by_name(name: &str) -> Result<Arc<dyn Algorithm>, AuditError> {
    let algorithm: AlgorithmType = name.parse()?;
    Ok(create_algorithm(algorithm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_returns_matching_type() {
        for algo in [AlgorithmType::Md5, AlgorithmType::Sha1, AlgorithmType::Sha256] {
            let oracle = create_algorithm(algo);
            assert_eq!(oracle.algorithm_type(), algo);
            assert_eq!(oracle.digest("x").unwrap().len(), algo.hex_len());
        }
    }

    #[test]
    fn unknown_name_refuses_to_start() {
        assert!(matches!(
            algorithm_by_name("crc32"),
            Err(AuditError::UnsupportedAlgorithm(_))
        ));
    }
}
