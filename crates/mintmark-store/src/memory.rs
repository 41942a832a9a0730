//! In-memory implementation of the RegistryStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use mintmark_core::{SchemaRegistration, TokenId, TokenRecord};
use mintmark_gate::Principal;

use crate::error::Result;
use crate::traits::{InsertOutcome, RegisterOutcome, RegistryStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock; each
/// operation takes the lock once, so the check and the write of an insert
/// are atomic with respect to all other operations.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// The write-once schema registration.
    registration: Option<SchemaRegistration>,

    /// Records indexed by identifier.
    records: HashMap<TokenId, TokenRecord>,

    /// Owner established at mint, per identifier.
    owners: HashMap<TokenId, Principal>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                registration: None,
                records: HashMap::new(),
                owners: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn put_registration(
        &self,
        registration: &SchemaRegistration,
    ) -> Result<RegisterOutcome> {
        let mut inner = self.inner.write().unwrap();

        if inner.registration.is_some() {
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        debug!(name = %registration.name, "storing schema registration");
        inner.registration = Some(registration.clone());
        Ok(RegisterOutcome::Stored)
    }

    async fn get_registration(&self) -> Result<Option<SchemaRegistration>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.registration.clone())
    }

    async fn insert_record(
        &self,
        id: TokenId,
        record: &TokenRecord,
        owner: &Principal,
    ) -> Result<InsertOutcome> {
        let mut inner = self.inner.write().unwrap();

        if inner.records.contains_key(&id) {
            return Ok(InsertOutcome::Exists);
        }

        debug!(token = %id, locator = %record.locator, "inserting record");
        inner.records.insert(id, record.clone());
        inner.owners.insert(id, *owner);
        Ok(InsertOutcome::Inserted)
    }

    async fn get_record(&self, id: TokenId) -> Result<Option<TokenRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.get(&id).cloned())
    }

    async fn has_record(&self, id: TokenId) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.records.contains_key(&id))
    }

    async fn owner_of(&self, id: TokenId) -> Result<Option<Principal>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.owners.get(&id).copied())
    }

    async fn list_tokens(&self) -> Result<Vec<TokenId>> {
        let inner = self.inner.read().unwrap();
        let mut tokens: Vec<TokenId> = inner.records.keys().copied().collect();
        tokens.sort_unstable();
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintmark_core::Sha256Digest;
    use mintmark_gate::Keypair;

    fn make_registration() -> SchemaRegistration {
        SchemaRegistration::new("Foo", "F", Sha256Digest::hash(b"schema"))
    }

    fn make_record(n: u8) -> TokenRecord {
        TokenRecord::new(
            format!("http://example.foo/{}", n),
            Sha256Digest::hash(&[n]),
        )
    }

    #[tokio::test]
    async fn test_registration_write_once() {
        let store = MemoryStore::new();

        let r1 = store.put_registration(&make_registration()).await.unwrap();
        assert_eq!(r1, RegisterOutcome::Stored);

        let other = SchemaRegistration::new("Bar", "B", Sha256Digest::hash(b"other"));
        let r2 = store.put_registration(&other).await.unwrap();
        assert_eq!(r2, RegisterOutcome::AlreadyRegistered);

        // First registration survives the rejected second write
        let stored = store.get_registration().await.unwrap().unwrap();
        assert_eq!(stored.name, "Foo");
    }

    #[tokio::test]
    async fn test_insert_and_get_record() {
        let store = MemoryStore::new();
        let owner = Keypair::generate().principal();
        let record = make_record(1);

        let outcome = store
            .insert_record(TokenId::new(1), &record, &owner)
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        let retrieved = store.get_record(TokenId::new(1)).await.unwrap().unwrap();
        assert_eq!(retrieved, record);
        assert_eq!(
            store.owner_of(TokenId::new(1)).await.unwrap(),
            Some(owner)
        );
    }

    #[tokio::test]
    async fn test_insert_taken_id_leaves_record_untouched() {
        let store = MemoryStore::new();
        let owner = Keypair::generate().principal();
        let first = make_record(1);
        let second = make_record(2);

        store
            .insert_record(TokenId::new(1), &first, &owner)
            .await
            .unwrap();

        let outcome = store
            .insert_record(TokenId::new(1), &second, &owner)
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::Exists);

        let stored = store.get_record(TokenId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored, first);
    }

    #[tokio::test]
    async fn test_absent_id() {
        let store = MemoryStore::new();
        assert!(!store.has_record(TokenId::new(9)).await.unwrap());
        assert!(store.get_record(TokenId::new(9)).await.unwrap().is_none());
        assert!(store.owner_of(TokenId::new(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_tokens_sorted() {
        let store = MemoryStore::new();
        let owner = Keypair::generate().principal();

        for id in [5u64, 1, 3] {
            store
                .insert_record(TokenId::new(id), &make_record(id as u8), &owner)
                .await
                .unwrap();
        }

        let tokens = store.list_tokens().await.unwrap();
        assert_eq!(
            tokens,
            vec![TokenId::new(1), TokenId::new(3), TokenId::new(5)]
        );
    }
}
