//! Provenance record types.
//!
//! A [`TokenRecord`] exists for an identifier if and only if a mint for that
//! identifier has succeeded, and is never mutated or deleted afterwards. The
//! single [`SchemaRegistration`] is set once at initialization and is
//! immutable for the lifetime of the deployment.

use serde::{Deserialize, Serialize};

use crate::digest::{HashAlgorithm, Integrity, Sha256Digest};

/// The immutable provenance record for one token.
///
/// Created exactly once by a successful mint. The locator points at the
/// off-chain metadata document; it is opaque to the registry and is not
/// validated for reachability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Opaque locator for the metadata document (typically a URI).
    pub locator: String,

    /// Digest of the canonical serialized metadata document.
    pub digest: Sha256Digest,

    /// Algorithm that produced `digest`. Fixed to SHA-256 in this version,
    /// stored per record so future records could carry a different tag.
    pub algorithm: HashAlgorithm,
}

impl TokenRecord {
    /// Create a record with the current fixed algorithm.
    pub fn new(locator: impl Into<String>, digest: Sha256Digest) -> Self {
        Self {
            locator: locator.into(),
            digest,
            algorithm: HashAlgorithm::Sha256,
        }
    }

    /// The record's digest paired with its algorithm tag.
    pub fn integrity(&self) -> Integrity {
        Integrity::new(self.digest, self.algorithm)
    }
}

/// The deployment-wide schema registration.
///
/// Holds the immutable collection identity and the digest of the canonical
/// schema document every metadata document must conform to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRegistration {
    /// Collection name.
    pub name: String,

    /// Collection symbol.
    pub symbol: String,

    /// Digest of the canonical serialized schema document.
    pub digest: Sha256Digest,

    /// Algorithm that produced `digest`.
    pub algorithm: HashAlgorithm,
}

impl SchemaRegistration {
    /// Create a registration with the current fixed algorithm.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        digest: Sha256Digest,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            digest,
            algorithm: HashAlgorithm::Sha256,
        }
    }

    /// The schema digest paired with its algorithm tag.
    pub fn integrity(&self) -> Integrity {
        Integrity::new(self.digest, self.algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_integrity_pairs_tag() {
        let digest = Sha256Digest::hash(b"metadata");
        let record = TokenRecord::new("http://example.foo/1", digest);

        let integrity = record.integrity();
        assert_eq!(integrity.digest, digest);
        assert_eq!(integrity.algorithm.as_str(), "sha256");
    }

    #[test]
    fn test_registration_integrity_pairs_tag() {
        let digest = Sha256Digest::hash(b"schema");
        let reg = SchemaRegistration::new("Foo", "F", digest);

        assert_eq!(reg.name, "Foo");
        assert_eq!(reg.symbol, "F");
        assert_eq!(reg.integrity().digest, digest);
        assert_eq!(reg.integrity().algorithm, HashAlgorithm::Sha256);
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let record = TokenRecord::new("ipfs://QmExample", Sha256Digest::hash(b"doc"));
        let json = serde_json::to_string(&record).unwrap();
        let back: TokenRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
