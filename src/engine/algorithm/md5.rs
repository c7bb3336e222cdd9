// src/engine/algorithm/md5.rs
//! MD5 oracle

use crate::engine::algorithm::Algorithm;
use crate::types::AlgorithmType;
use crate::utils::error::AuditError;
use ::md5::{Digest, Md5};

/// MD5 over the raw candidate bytes
pub struct Md5Algo;

impl Algorithm for Md5Algo {
    fn hash(&self, candidate: &[u8]) -> Result<Vec<u8>, AuditError> {
        Ok(Md5::digest(candidate).to_vec())
    }

    fn algorithm_type(&self) -> AlgorithmType {
        AlgorithmType::Md5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn known_vectors() {
        assert_eq!(
            Md5Algo.hash(b"").unwrap(),
            hex!("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(
            Md5Algo.digest("letmein").unwrap(),
            "0d107d09f5bbe40cade3de5c71e9e9b7"
        );
    }

    #[test]
    fn multibyte_candidates_hash_as_utf8() {
        let bytes = "pässwörd".as_bytes();
        assert_eq!(Md5Algo.hash(bytes).unwrap().len(), 16);
    }
}
