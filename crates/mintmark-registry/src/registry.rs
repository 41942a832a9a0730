//! The Registry: unified API for Mintmark.
//!
//! The Registry brings together storage and the capability gate into a
//! cohesive interface: one write-once initialization, capability-gated
//! minting, and the integrity read queries.

use std::sync::Arc;

use tracing::info;

use mintmark_core::{Integrity, InterfaceId, SchemaRegistration, Sha256Digest, TokenId, TokenRecord};
use mintmark_gate::{MintGate, Principal};
use mintmark_store::{InsertOutcome, RegisterOutcome, RegistryStore};

use crate::error::{RegistryError, Result};

/// The main Registry struct.
///
/// Provides a unified API for:
/// - One-time initialization with the deployment-wide schema digest
/// - Creating immutable provenance records (mint)
/// - Integrity queries (content, schema, owner)
/// - Capability discovery
///
/// All state lives in the injected store; the registry itself is stateless
/// between calls. Each operation is atomic: the backends perform the
/// existence check and the write under a single guard, so callers never
/// observe partial state.
pub struct Registry<S: RegistryStore, G: MintGate> {
    /// The storage backend.
    store: Arc<S>,
    /// The capability gate consulted before every mint.
    gate: G,
}

impl<S: RegistryStore, G: MintGate> Registry<S, G> {
    /// Create a new registry over a store and a gate.
    pub fn new(store: S, gate: G) -> Self {
        Self {
            store: Arc::new(store),
            gate,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Initialize the registry: set the immutable collection identity and
    /// the deployment-wide schema digest.
    ///
    /// Must succeed exactly once before any other operation. A second call
    /// fails with `AlreadyInitialized` and leaves the first registration
    /// untouched.
    pub async fn initialize(
        &self,
        name: &str,
        symbol: &str,
        schema_digest: Sha256Digest,
    ) -> Result<()> {
        let registration = SchemaRegistration::new(name, symbol, schema_digest);

        match self.store.put_registration(&registration).await? {
            RegisterOutcome::Stored => {
                info!(name, symbol, schema = %schema_digest, "registry initialized");
                Ok(())
            }
            RegisterOutcome::AlreadyRegistered => Err(RegistryError::AlreadyInitialized),
        }
    }

    /// Get the schema registration.
    ///
    /// Fails with `NotInitialized` before the first successful
    /// [`initialize`](Self::initialize).
    pub async fn registration(&self) -> Result<SchemaRegistration> {
        self.store
            .get_registration()
            .await?
            .ok_or(RegistryError::NotInitialized)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mint
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the immutable provenance record for `id` and establish
    /// `owner` as its holder.
    ///
    /// `minter` must clear the capability gate. The record becomes visible
    /// to all queries atomically with this call; on any failure nothing is
    /// written.
    pub async fn mint(
        &self,
        minter: &Principal,
        owner: &Principal,
        id: TokenId,
        locator: impl Into<String>,
        digest: Sha256Digest,
    ) -> Result<()> {
        // Lifecycle gate: nothing is mintable before initialize
        self.registration().await?;

        self.gate.check_mint(minter)?;

        if owner.is_zero() {
            return Err(RegistryError::InvalidOwner);
        }

        let record = TokenRecord::new(locator, digest);

        match self.store.insert_record(id, &record, owner).await? {
            InsertOutcome::Inserted => {
                info!(token = %id, owner = %owner, digest = %digest, "minted");
                Ok(())
            }
            InsertOutcome::Exists => Err(RegistryError::TokenExists(id)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Integrity Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the content digest for `id`, paired with its algorithm tag.
    ///
    /// Clients compare the answer against a digest they compute locally
    /// over the fetched metadata document. Fails with `UnknownToken`
    /// (code `003002`) when no record exists; the existence check happens
    /// before anything else.
    pub async fn token_integrity(&self, id: TokenId) -> Result<Integrity> {
        let record = self
            .store
            .get_record(id)
            .await?
            .ok_or(RegistryError::UnknownToken(id))?;

        Ok(record.integrity())
    }

    /// Get the schema digest governing `id`'s metadata, paired with its
    /// algorithm tag.
    ///
    /// The digest is deployment-wide, but the query is still gated on the
    /// identifier existing: it answers "which schema governs this token",
    /// which is only meaningful for minted tokens. Absent identifiers fail
    /// with the same `UnknownToken` code as
    /// [`token_integrity`](Self::token_integrity), so clients treat both
    /// queries uniformly.
    pub async fn schema_integrity(&self, id: TokenId) -> Result<Integrity> {
        if !self.store.has_record(id).await? {
            return Err(RegistryError::UnknownToken(id));
        }

        let registration = self.registration().await?;
        Ok(registration.integrity())
    }

    /// Get the owner established when `id` was minted.
    pub async fn owner_of(&self, id: TokenId) -> Result<Principal> {
        self.store
            .owner_of(id)
            .await?
            .ok_or(RegistryError::UnknownToken(id))
    }

    /// List all minted identifiers.
    pub async fn tokens(&self) -> Result<Vec<TokenId>> {
        Ok(self.store.list_tokens().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Capability Discovery
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether this registry implements the capability named by `selector`.
    ///
    /// Pure and stateless: true for the integrity-query pair and for
    /// discovery itself, false for everything else, for the life of the
    /// deployment.
    pub fn supports_interface(&self, selector: InterfaceId) -> bool {
        selector.supported()
    }
}
