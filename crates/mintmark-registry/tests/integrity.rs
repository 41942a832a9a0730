//! End-to-end tests for the integrity registry.
//!
//! Drives the full surface - initialize, mint, the two integrity queries,
//! owner lookup, capability discovery - over both storage backends, and
//! checks the stable error codes automated clients branch on.

use serde_json::json;

use mintmark_registry::gate::{Keypair, SingleOwnerGate};
use mintmark_registry::store::{MemoryStore, SqliteStore};
use mintmark_registry::{
    digest_document, InterfaceId, Principal, Registry, RegistryError, Sha256Digest, TokenId,
};

/// Digest constants from the reference fixture set.
const SCHEMA_DIGEST: &str = "0x9c22ff5f21f0b81b113e63f7db6da94fedef11b2119b4088b89664fb9a3cb658";
const CONTENT_DIGEST: &str = "0x973124ffc4a03e66d6a4458e587d5d6146f71fc57f359c8d516e0b12a50ab0d9";
const URI_1: &str = "http://example.foo/1";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

struct Parties {
    authority: Principal,
    bob: Principal,
}

fn parties() -> Parties {
    Parties {
        authority: Keypair::from_seed(&[0x01; 32]).principal(),
        bob: Keypair::from_seed(&[0x02; 32]).principal(),
    }
}

/// A registry initialized with the reference schema digest.
async fn deployed_registry() -> (Registry<MemoryStore, SingleOwnerGate>, Parties) {
    init_tracing();
    let p = parties();
    let registry = Registry::new(MemoryStore::new(), SingleOwnerGate::new(p.authority));
    registry
        .initialize("Foo", "F", Sha256Digest::from_hex(SCHEMA_DIGEST).unwrap())
        .await
        .unwrap();
    (registry, p)
}

#[tokio::test]
async fn mint_then_query_content_integrity() {
    let (registry, p) = deployed_registry().await;
    let digest = Sha256Digest::from_hex(CONTENT_DIGEST).unwrap();

    registry
        .mint(&p.authority, &p.bob, TokenId::new(1), URI_1, digest)
        .await
        .unwrap();

    let integrity = registry.token_integrity(TokenId::new(1)).await.unwrap();
    assert_eq!(integrity.digest, digest);
    assert_eq!(integrity.algorithm.as_str(), "sha256");
}

#[tokio::test]
async fn mint_then_query_schema_integrity() {
    let (registry, p) = deployed_registry().await;

    registry
        .mint(
            &p.authority,
            &p.bob,
            TokenId::new(1),
            URI_1,
            Sha256Digest::from_hex(CONTENT_DIGEST).unwrap(),
        )
        .await
        .unwrap();

    let integrity = registry.schema_integrity(TokenId::new(1)).await.unwrap();
    assert_eq!(
        integrity.digest,
        Sha256Digest::from_hex(SCHEMA_DIGEST).unwrap()
    );
    assert_eq!(integrity.algorithm.as_str(), "sha256");
}

#[tokio::test]
async fn unknown_token_fails_both_queries_with_stable_code() {
    let (registry, p) = deployed_registry().await;

    let err = registry.token_integrity(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");

    let err = registry.schema_integrity(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");

    let err = registry.owner_of(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");

    // Minting a different id does not make id 1 known
    registry
        .mint(
            &p.authority,
            &p.bob,
            TokenId::new(2),
            "http://example.foo/2",
            Sha256Digest::hash(b"other"),
        )
        .await
        .unwrap();
    let err = registry.token_integrity(TokenId::new(1)).await.unwrap_err();
    assert!(matches!(err, RegistryError::UnknownToken(id) if id == TokenId::new(1)));
}

#[tokio::test]
async fn uninitialized_registry_rejects_mint_but_answers_queries() {
    init_tracing();
    let p = parties();
    let registry = Registry::new(MemoryStore::new(), SingleOwnerGate::new(p.authority));

    let err = registry
        .mint(
            &p.authority,
            &p.bob,
            TokenId::new(1),
            URI_1,
            Sha256Digest::hash(b"doc"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "019001");

    // No record can exist yet, so queries take the unknown-token path
    let err = registry.token_integrity(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");
    let err = registry.schema_integrity(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");
}

#[tokio::test]
async fn duplicate_mint_fails_and_preserves_original() {
    let (registry, p) = deployed_registry().await;
    let original = Sha256Digest::from_hex(CONTENT_DIGEST).unwrap();

    registry
        .mint(&p.authority, &p.bob, TokenId::new(1), URI_1, original)
        .await
        .unwrap();

    // Same data
    let err = registry
        .mint(&p.authority, &p.bob, TokenId::new(1), URI_1, original)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "003006");

    // Different data
    let err = registry
        .mint(
            &p.authority,
            &p.bob,
            TokenId::new(1),
            "http://example.foo/other",
            Sha256Digest::hash(b"tampered"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::TokenExists(id) if id == TokenId::new(1)));

    // The stored record never changed
    let integrity = registry.token_integrity(TokenId::new(1)).await.unwrap();
    assert_eq!(integrity.digest, original);
}

#[tokio::test]
async fn unauthorized_minter_is_rejected_without_state_change() {
    let (registry, p) = deployed_registry().await;
    let mallory = Keypair::from_seed(&[0x03; 32]).principal();

    let err = registry
        .mint(
            &mallory,
            &p.bob,
            TokenId::new(1),
            URI_1,
            Sha256Digest::from_hex(CONTENT_DIGEST).unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "018001");
    assert!(matches!(
        err,
        RegistryError::NotAuthorized { principal } if principal == mallory
    ));

    // id 1 is still absent
    let err = registry.token_integrity(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");
}

#[tokio::test]
async fn zero_owner_target_is_rejected() {
    let (registry, p) = deployed_registry().await;

    let err = registry
        .mint(
            &p.authority,
            &Principal::ZERO,
            TokenId::new(1),
            URI_1,
            Sha256Digest::hash(b"doc"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "003001");

    // id 1 is still absent
    let err = registry.token_integrity(TokenId::new(1)).await.unwrap_err();
    assert_eq!(err.code(), "003002");
}

#[tokio::test]
async fn schema_digest_is_invariant_across_tokens() {
    let (registry, p) = deployed_registry().await;
    let schema = Sha256Digest::from_hex(SCHEMA_DIGEST).unwrap();

    for id in 1u64..=5 {
        registry
            .mint(
                &p.authority,
                &p.bob,
                TokenId::new(id),
                format!("http://example.foo/{}", id),
                Sha256Digest::hash(format!("doc {}", id).as_bytes()),
            )
            .await
            .unwrap();
    }

    for id in 1u64..=5 {
        let integrity = registry.schema_integrity(TokenId::new(id)).await.unwrap();
        assert_eq!(integrity.digest, schema);
    }
}

#[tokio::test]
async fn owner_is_established_at_mint() {
    let (registry, p) = deployed_registry().await;

    registry
        .mint(
            &p.authority,
            &p.bob,
            TokenId::new(1),
            URI_1,
            Sha256Digest::hash(b"doc"),
        )
        .await
        .unwrap();

    assert_eq!(registry.owner_of(TokenId::new(1)).await.unwrap(), p.bob);
    assert_eq!(registry.tokens().await.unwrap(), vec![TokenId::new(1)]);
}

#[tokio::test]
async fn capability_discovery() {
    let (registry, _) = deployed_registry().await;

    assert!(registry.supports_interface(InterfaceId::from(0x832a_7e0e_u32)));
    assert!(registry.supports_interface(InterfaceId::DISCOVERY));
    assert!(!registry.supports_interface(InterfaceId::from(0xffff_ffff_u32)));
    assert!(!registry.supports_interface(InterfaceId::from(0x80ac_58cd_u32)));
}

#[tokio::test]
async fn canonical_documents_drive_the_digests() {
    init_tracing();
    let p = parties();
    let registry = Registry::new(MemoryStore::new(), SingleOwnerGate::new(p.authority));

    let schema = json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Token metadata",
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "description": {"type": "string"},
            "image": {"type": "string"}
        },
        "required": ["name"]
    });
    let metadata = json!({
        "name": "Foo #1",
        "description": "Magic Skin",
        "image": "https://example.foo/1.png"
    });

    let schema_digest = digest_document(&schema).unwrap();
    let content_digest = digest_document(&metadata).unwrap();

    registry.initialize("Foo", "F", schema_digest).await.unwrap();
    registry
        .mint(&p.authority, &p.bob, TokenId::new(1), URI_1, content_digest)
        .await
        .unwrap();

    // A verifying client recomputes both digests from the documents it
    // fetched and gets exact matches
    assert_eq!(
        registry.token_integrity(TokenId::new(1)).await.unwrap().digest,
        digest_document(&metadata).unwrap()
    );
    assert_eq!(
        registry.schema_integrity(TokenId::new(1)).await.unwrap().digest,
        digest_document(&schema).unwrap()
    );
}

#[tokio::test]
async fn sqlite_backed_registry_end_to_end() {
    init_tracing();
    let p = parties();
    let registry = Registry::new(
        SqliteStore::open_memory().unwrap(),
        SingleOwnerGate::new(p.authority),
    );
    let schema_digest = Sha256Digest::from_hex(SCHEMA_DIGEST).unwrap();
    let content_digest = Sha256Digest::from_hex(CONTENT_DIGEST).unwrap();

    registry.initialize("Foo", "F", schema_digest).await.unwrap();
    registry
        .mint(&p.authority, &p.bob, TokenId::new(1), URI_1, content_digest)
        .await
        .unwrap();

    let integrity = registry.token_integrity(TokenId::new(1)).await.unwrap();
    assert_eq!(integrity.digest, content_digest);
    assert_eq!(
        registry.schema_integrity(TokenId::new(1)).await.unwrap().digest,
        schema_digest
    );
}

#[tokio::test]
async fn registry_state_survives_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");
    let p = parties();
    let schema_digest = Sha256Digest::from_hex(SCHEMA_DIGEST).unwrap();
    let content_digest = Sha256Digest::from_hex(CONTENT_DIGEST).unwrap();

    {
        let registry = Registry::new(
            SqliteStore::open(&path).unwrap(),
            SingleOwnerGate::new(p.authority),
        );
        registry.initialize("Foo", "F", schema_digest).await.unwrap();
        registry
            .mint(&p.authority, &p.bob, TokenId::new(1), URI_1, content_digest)
            .await
            .unwrap();
    }

    let reopened = Registry::new(
        SqliteStore::open(&path).unwrap(),
        SingleOwnerGate::new(p.authority),
    );

    // Initialization is per store lifetime, not per process
    let err = reopened
        .initialize("Foo", "F", schema_digest)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "019002");

    let integrity = reopened.token_integrity(TokenId::new(1)).await.unwrap();
    assert_eq!(integrity.digest, content_digest);
    assert_eq!(reopened.owner_of(TokenId::new(1)).await.unwrap(), p.bob);
}
