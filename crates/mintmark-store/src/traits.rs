//! Store trait: the abstract interface for registry persistence.
//!
//! This trait keeps the registry storage-agnostic. Implementations include
//! SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use mintmark_core::{SchemaRegistration, TokenId, TokenRecord};
use mintmark_gate::Principal;

use crate::error::Result;

/// Result of inserting a token record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record was inserted; it is now visible to all reads.
    Inserted,
    /// A record already exists for this identifier. Nothing was written.
    Exists,
}

/// Result of storing the schema registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Registration was stored; the store is now initialized.
    Stored,
    /// A registration already exists. Nothing was written.
    AlreadyRegistered,
}

/// The RegistryStore trait: async interface for registry persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, `spawn_blocking` is used internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Write-once registration**: `put_registration` stores at most one
///   registration per store lifetime; later calls return
///   `AlreadyRegistered` without touching the stored value.
/// - **Write-once records**: `insert_record` checks existence and writes
///   the record together with its owner under one guard. A taken
///   identifier returns `Exists` and leaves the stored record untouched.
/// - **No mutation, no deletion**: there is deliberately no update or
///   remove method for records; immutability is the integrity guarantee.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Registration Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Store the schema registration if none exists yet.
    async fn put_registration(&self, registration: &SchemaRegistration)
        -> Result<RegisterOutcome>;

    /// Get the schema registration, if the store is initialized.
    async fn get_registration(&self) -> Result<Option<SchemaRegistration>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Record Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a record and its owner for an absent identifier.
    async fn insert_record(
        &self,
        id: TokenId,
        record: &TokenRecord,
        owner: &Principal,
    ) -> Result<InsertOutcome>;

    /// Get the record for an identifier.
    async fn get_record(&self, id: TokenId) -> Result<Option<TokenRecord>>;

    /// Check whether a record exists for an identifier.
    async fn has_record(&self, id: TokenId) -> Result<bool>;

    /// Get the owner established when the identifier was minted.
    async fn owner_of(&self, id: TokenId) -> Result<Option<Principal>>;

    /// List all minted identifiers, ordered ascending.
    async fn list_tokens(&self) -> Result<Vec<TokenId>>;
}
