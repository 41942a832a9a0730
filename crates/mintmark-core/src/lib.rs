//! # Mintmark Core
//!
//! Pure primitives for the Mintmark integrity registry: token identifiers,
//! digests, provenance records, and canonical JSON.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over the data the registry stores and returns.
//!
//! ## Key Types
//!
//! - [`TokenId`] - Caller-supplied unique token identifier
//! - [`Sha256Digest`] - 32-byte content or schema digest
//! - [`HashAlgorithm`] - The algorithm tag paired with every digest
//! - [`TokenRecord`] - Immutable {locator, digest} provenance record
//! - [`SchemaRegistration`] - The deployment-wide schema digest
//! - [`InterfaceId`] - 4-byte capability selector
//!
//! ## Canonical JSON
//!
//! Digests are computed over a deterministic JSON encoding so that the same
//! document always hashes to the same value. See [`canonical`].

pub mod canonical;
pub mod digest;
pub mod error;
pub mod record;
pub mod types;

pub use canonical::{canonical_json_bytes, digest_document};
pub use digest::{HashAlgorithm, Integrity, Sha256Digest};
pub use error::CoreError;
pub use record::{SchemaRegistration, TokenRecord};
pub use types::{InterfaceId, TokenId};
