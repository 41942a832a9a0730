//! Strong type definitions for the Mintmark registry.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique token identifier.
///
/// Caller-supplied at mint time. The registry guarantees at most one record
/// per identifier for the lifetime of the deployment.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl TokenId {
    /// Create a new TokenId from a raw value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A 4-byte capability selector.
///
/// Clients probe the registry with a selector to discover which query
/// contracts it implements. The supported set is fixed at compile time and
/// never changes for the life of a deployment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceId(pub [u8; 4]);

impl InterfaceId {
    /// The metadata-integrity query pair: token integrity + schema integrity.
    pub const METADATA_INTEGRITY: Self = Self([0x83, 0x2a, 0x7e, 0x0e]);

    /// Capability discovery itself.
    pub const DISCOVERY: Self = Self([0x01, 0xff, 0xc9, 0xa7]);

    /// All selectors this registry implements.
    pub const SUPPORTED: [Self; 2] = [Self::METADATA_INTEGRITY, Self::DISCOVERY];

    /// Create from raw selector bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Get the raw selector bytes.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether this selector names a capability the registry implements.
    ///
    /// Pure and stateless: the answer depends only on the selector value.
    pub fn supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceId(0x{})", self.to_hex())
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl From<[u8; 4]> for InterfaceId {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<u32> for InterfaceId {
    fn from(selector: u32) -> Self {
        Self(selector.to_be_bytes())
    }
}
