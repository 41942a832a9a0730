//! Digest primitives for the Mintmark registry.
//!
//! Wraps SHA-256 hashing with strong types. Every digest the registry hands
//! out travels with the [`HashAlgorithm`] tag that produced it; clients must
//! never assume an algorithm.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::CoreError;

/// The hash algorithm that produced a digest.
///
/// Only SHA-256 is modeled in this version. The tag is carried explicitly on
/// every record and query result so a future version can introduce another
/// algorithm without breaking callers that already read the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256, 32-byte output.
    Sha256,
}

impl HashAlgorithm {
    /// The canonical string form of the tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    /// Parse a tag string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "sha256" => Ok(HashAlgorithm::Sha256),
            other => Err(CoreError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    /// Digest length in bytes.
    pub const fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Digest(pub [u8; 32]);

impl Sha256Digest {
    /// Compute the SHA-256 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let out = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&out);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to bare hex (64 characters, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex. A leading `0x` prefix is accepted.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| CoreError::InvalidDigestLength(b.len()))?;
        Ok(Self(arr))
    }

    /// The zero digest (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Sha256Digest {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice
            .try_into()
            .map_err(|_| CoreError::InvalidDigestLength(slice.len()))?;
        Ok(Self(arr))
    }
}

/// A digest paired with the algorithm that produced it.
///
/// This is the result shape of every integrity query: clients compare
/// `digest` against their locally computed value using `algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integrity {
    /// The stored digest.
    pub digest: Sha256Digest,
    /// The algorithm that produced it.
    pub algorithm: HashAlgorithm,
}

impl Integrity {
    /// Pair a digest with its algorithm tag.
    pub const fn new(digest: Sha256Digest, algorithm: HashAlgorithm) -> Self {
        Self { digest, algorithm }
    }
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.digest, self.algorithm)
    }
}
