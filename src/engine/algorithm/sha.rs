// src/engine/algorithm/sha.rs
//! SHA-1 and SHA-256 oracles

use crate::engine::algorithm::Algorithm;
use crate::types::AlgorithmType;
use crate::utils::error::AuditError;
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// SHA-1 over the raw candidate bytes
pub struct Sha1Algo;

/// SHA-256 over the raw candidate bytes
pub struct Sha256Algo;

impl Algorithm for Sha1Algo {
    fn hash(&self, candidate: &[u8]) -> Result<Vec<u8>, AuditError> {
        Ok(Sha1::digest(candidate).to_vec())
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Sha1
    }
}

impl Algorithm for Sha256Algo {
    fn hash(&self, candidate: &[u8]) -> Result<Vec<u8>, AuditError> {
        Ok(Sha256::digest(candidate).to_vec())
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Sha256
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sha1_known_vector() {
        assert_eq!(
            Sha1Algo.hash(b"abc").unwrap(),
            hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            Sha256Algo.hash(b"abc").unwrap(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }
}
