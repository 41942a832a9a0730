//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: an authority keypair, a
//! single-owner gate, and a memory-backed registry.

use mintmark_core::{Sha256Digest, TokenId};
use mintmark_gate::{Keypair, Principal, SingleOwnerGate};
use mintmark_registry::{Registry, Result};
use mintmark_store::MemoryStore;

/// A test fixture with an authority and a memory-backed registry.
pub struct TestFixture {
    /// The keypair whose principal clears the gate.
    pub authority: Keypair,
    /// The registry under test.
    pub registry: Registry<MemoryStore, SingleOwnerGate>,
}

impl TestFixture {
    /// Create a fixture with a random authority. The registry is not yet
    /// initialized.
    pub fn new() -> Self {
        Self::from_keypair(Keypair::generate())
    }

    /// Create with a deterministic authority from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_keypair(Keypair::from_seed(&seed))
    }

    fn from_keypair(authority: Keypair) -> Self {
        let gate = SingleOwnerGate::new(authority.principal());
        Self {
            authority,
            registry: Registry::new(MemoryStore::new(), gate),
        }
    }

    /// The authority's principal.
    pub fn authority(&self) -> Principal {
        self.authority.principal()
    }

    /// Initialize the registry with a fixed identity and the given schema
    /// digest.
    pub async fn initialize(&self, schema_digest: Sha256Digest) -> Result<()> {
        self.registry.initialize("Test", "T", schema_digest).await
    }

    /// Mint `id` as the authority, for a fresh owner. Returns the owner
    /// and the content digest that went in.
    pub async fn mint_simple(&self, id: TokenId) -> Result<(Principal, Sha256Digest)> {
        let owner = Keypair::generate().principal();
        let digest = Sha256Digest::hash(format!("document {}", id).as_bytes());
        self.registry
            .mint(
                &self.authority(),
                &owner,
                id,
                format!("http://example.foo/{}", id),
                digest,
            )
            .await?;
        Ok((owner, digest))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple deterministic principals for multi-party tests.
pub fn multi_party_principals(count: usize) -> Vec<Principal> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xa5;
            Keypair::from_seed(&seed).principal()
        })
        .collect()
}
