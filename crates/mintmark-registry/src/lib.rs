//! # Mintmark Registry
//!
//! The unified API for Mintmark - content-integrity verification for token
//! metadata.
//!
//! ## Overview
//!
//! A registry maps token identifiers to immutable provenance records:
//! a metadata locator, the digest of the canonical metadata document, and
//! the algorithm tag that produced it. One schema digest, set at
//! initialization, covers the whole deployment. Clients fetch the metadata
//! themselves, recompute the digest locally, and compare it against the
//! registry's answer to detect tampering or drift.
//!
//! ## Key Concepts
//!
//! - **Record**: Immutable. Written once by mint, never changed or deleted.
//! - **Schema registration**: Written once by initialize, immutable after.
//! - **Capability gate**: Minting requires clearing an injected [`MintGate`].
//! - **Algorithm tag**: Every digest answer carries `"sha256"` explicitly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mintmark_registry::{Registry, Sha256Digest, TokenId};
//! use mintmark_registry::gate::{Keypair, SingleOwnerGate};
//! use mintmark_registry::store::SqliteStore;
//!
//! async fn example() {
//!     let authority = Keypair::generate();
//!     let store = SqliteStore::open("registry.db").unwrap();
//!     let registry = Registry::new(store, SingleOwnerGate::new(authority.principal()));
//!
//!     registry
//!         .initialize("Foo", "F", Sha256Digest::hash(b"canonical schema bytes"))
//!         .await
//!         .unwrap();
//!
//!     let collector = Keypair::generate().principal();
//!     registry
//!         .mint(
//!             &authority.principal(),
//!             &collector,
//!             TokenId::new(1),
//!             "http://example.foo/1",
//!             Sha256Digest::hash(b"canonical metadata bytes"),
//!         )
//!         .await
//!         .unwrap();
//!
//!     let integrity = registry.token_integrity(TokenId::new(1)).await.unwrap();
//!     assert_eq!(integrity.algorithm.as_str(), "sha256");
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `mintmark_registry::core` - Core primitives (TokenId, digests, records)
//! - `mintmark_registry::gate` - Principals and mint gates
//! - `mintmark_registry::store` - Storage abstraction, memory and SQLite

pub mod error;
pub mod registry;

// Re-export component crates
pub use mintmark_core as core;
pub use mintmark_gate as gate;
pub use mintmark_store as store;

// Re-export main types for convenience
pub use error::{RegistryError, Result};
pub use registry::Registry;

// Re-export commonly used core types
pub use mintmark_core::{
    canonical_json_bytes, digest_document, HashAlgorithm, Integrity, InterfaceId,
    SchemaRegistration, Sha256Digest, TokenId, TokenRecord,
};
pub use mintmark_gate::{MintGate, Principal};
