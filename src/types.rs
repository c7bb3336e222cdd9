// src/types.rs
use crate::utils::error::AuditError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A plaintext guess tested against the target digest
pub type Candidate = String;

/// Supported digest algorithms
///
/// Each variant maps to one unsalted hash function applied to the UTF-8
/// bytes of a candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmType {
    /// MD5 (128-bit, 32 hex characters)
    #[clap(name = "md5")]
    Md5,

    /// SHA-1 (160-bit, 40 hex characters)
    #[clap(name = "sha1")]
    Sha1,

    /// SHA-256 (256-bit, 64 hex characters)
    #[clap(name = "sha256")]
    Sha256,
}

impl AlgorithmType {
    /// Width of a digest for this algorithm, in hex characters
    pub fn hex_len(self) -> usize {
        match self {
            AlgorithmType::Md5 => 32,
            AlgorithmType::Sha1 => 40,
            AlgorithmType::Sha256 => 64,
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmType::Md5 => write!(f, "md5"),
            AlgorithmType::Sha1 => write!(f, "sha1"),
            AlgorithmType::Sha256 => write!(f, "sha256"),
        }
    }
}

impl FromStr for AlgorithmType {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md5" => Ok(AlgorithmType::Md5),
            "sha1" | "sha-1" => Ok(AlgorithmType::Sha1),
            "sha256" | "sha-256" => Ok(AlgorithmType::Sha256),
            _ => Err(AuditError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Target digest, normalized to lowercase hex once at input time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest {
    hex: String,
    bytes: Vec<u8>,
}

impl Digest {
    /// Parses and validates a hex digest for the given algorithm
    ///
    /// Fails with [`AuditError::InvalidDigest`] when the string is not hex
    /// or its width does not match the algorithm.
    pub fn parse(hex_digest: &str, algorithm: AlgorithmType) -> Result<Self, AuditError> {
        let normalized = hex_digest.trim().to_ascii_lowercase();
        if normalized.len() != algorithm.hex_len() {
            return Err(AuditError::InvalidDigest(format!(
                "{} digest must be {} hex characters, got {}",
                algorithm,
                algorithm.hex_len(),
                normalized.len()
            )));
        }
        let bytes = hex::decode(&normalized)?;
        Ok(Digest {
            hex: normalized,
            bytes,
        })
    }

    /// Lowercase hex form
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Raw digest bytes, compared against oracle output in the hot loop
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithm_aliases() {
        assert_eq!("MD5".parse::<AlgorithmType>().unwrap(), AlgorithmType::Md5);
        assert_eq!("sha-1".parse::<AlgorithmType>().unwrap(), AlgorithmType::Sha1);
        assert_eq!("sha256".parse::<AlgorithmType>().unwrap(), AlgorithmType::Sha256);
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = "whirlpool".parse::<AlgorithmType>().unwrap_err();
        assert!(matches!(err, AuditError::UnsupportedAlgorithm(name) if name == "whirlpool"));
    }

    #[test]
    fn digest_is_normalized_to_lowercase() {
        let d = Digest::parse("0D107D09F5BBE40CADE3DE5C71E9E9B7", AlgorithmType::Md5).unwrap();
        assert_eq!(d.as_str(), "0d107d09f5bbe40cade3de5c71e9e9b7");
    }

    #[test]
    fn digest_width_must_match_algorithm() {
        let md5_width = "0d107d09f5bbe40cade3de5c71e9e9b7";
        assert!(Digest::parse(md5_width, AlgorithmType::Sha1).is_err());
        assert!(Digest::parse("zz107d09f5bbe40cade3de5c71e9e9b7", AlgorithmType::Md5).is_err());
    }
}
