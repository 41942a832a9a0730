//! Known-answer vectors for cross-implementation verification.
//!
//! Every implementation of the integrity surface must reproduce these
//! answers exactly: initialize with the schema digest, mint the listed
//! token, and both queries return the listed digests tagged `sha256`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use mintmark_core::{digest_document, Sha256Digest, TokenId};
use mintmark_gate::{Keypair, SingleOwnerGate};
use mintmark_registry::{Registry, RegistryError};
use mintmark_store::MemoryStore;

/// A single known-answer vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownVector {
    pub name: String,
    pub description: String,

    // Deployment inputs
    pub collection_name: String,
    pub collection_symbol: String,
    pub schema_digest: String, // 32 bytes hex, 0x-prefixed
    /// The schema document the digest was computed from, when known.
    pub schema_document: Option<Value>,

    // Mint inputs
    pub token_id: u64,
    pub locator: String,
    pub content_digest: String, // 32 bytes hex, 0x-prefixed
    /// The metadata document the digest was computed from, when known.
    pub metadata_document: Option<Value>,

    // Expected answers
    pub hash_algorithm: String,
}

/// The reference vector set.
pub fn reference_vectors() -> Vec<KnownVector> {
    let schema_document = json!({
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
    let metadata_document = json!({
        "name": "Foo #1",
        "description": "Magic Skin",
        "image": "https://example.foo/1.png"
    });

    vec![
        // Vector 1: the fixture digests shared with other implementations
        KnownVector {
            name: "reference_fixture".to_string(),
            description: "Opaque digest constants shared across implementations".to_string(),
            collection_name: "Foo".to_string(),
            collection_symbol: "F".to_string(),
            schema_digest:
                "0x9c22ff5f21f0b81b113e63f7db6da94fedef11b2119b4088b89664fb9a3cb658".to_string(),
            schema_document: None,
            token_id: 1,
            locator: "http://example.foo/1".to_string(),
            content_digest:
                "0x973124ffc4a03e66d6a4458e587d5d6146f71fc57f359c8d516e0b12a50ab0d9".to_string(),
            metadata_document: None,
            hash_algorithm: "sha256".to_string(),
        },
        // Vector 2: digests derived from canonical JSON documents
        KnownVector {
            name: "canonical_documents".to_string(),
            description: "Digests recomputable from the embedded canonical documents"
                .to_string(),
            collection_name: "Foo".to_string(),
            collection_symbol: "F".to_string(),
            schema_digest:
                "0x22049f524c252bec2791e6053b08901dea40fdb64d0aed6c9a482ca94b093563".to_string(),
            schema_document: Some(schema_document),
            token_id: 7,
            locator: "https://example.foo/7.json".to_string(),
            content_digest:
                "0xf96125bc2d395a8a5023ae0b2e2185c708c6f9839c0378c6da7b050826222a24".to_string(),
            metadata_document: Some(metadata_document),
            hash_algorithm: "sha256".to_string(),
        },
    ]
}

/// Run a vector through a fresh registry and check every expected answer.
pub async fn verify_vector(vector: &KnownVector) -> Result<(), RegistryError> {
    let authority = Keypair::from_seed(&[0x01; 32]);
    let registry = Registry::new(
        MemoryStore::new(),
        SingleOwnerGate::new(authority.principal()),
    );

    let schema_digest =
        Sha256Digest::from_hex(&vector.schema_digest).expect("vector schema digest");
    let content_digest =
        Sha256Digest::from_hex(&vector.content_digest).expect("vector content digest");
    let id = TokenId::new(vector.token_id);

    registry
        .initialize(&vector.collection_name, &vector.collection_symbol, schema_digest)
        .await?;

    let owner = Keypair::from_seed(&[0x02; 32]).principal();
    registry
        .mint(
            &authority.principal(),
            &owner,
            id,
            vector.locator.clone(),
            content_digest,
        )
        .await?;

    let content = registry.token_integrity(id).await?;
    assert_eq!(content.digest, content_digest, "{}: content digest", vector.name);
    assert_eq!(
        content.algorithm.as_str(),
        vector.hash_algorithm,
        "{}: content tag",
        vector.name
    );

    let schema = registry.schema_integrity(id).await?;
    assert_eq!(schema.digest, schema_digest, "{}: schema digest", vector.name);
    assert_eq!(
        schema.algorithm.as_str(),
        vector.hash_algorithm,
        "{}: schema tag",
        vector.name
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_deterministic() {
        let v1 = reference_vectors();
        let v2 = reference_vectors();

        for (a, b) in v1.iter().zip(v2.iter()) {
            assert_eq!(a.schema_digest, b.schema_digest, "schema mismatch for {}", a.name);
            assert_eq!(a.content_digest, b.content_digest, "content mismatch for {}", a.name);
        }
    }

    #[test]
    fn test_embedded_documents_match_digests() {
        for vector in reference_vectors() {
            if let Some(ref doc) = vector.schema_document {
                assert_eq!(
                    digest_document(doc).unwrap(),
                    Sha256Digest::from_hex(&vector.schema_digest).unwrap(),
                    "schema document mismatch for {}",
                    vector.name
                );
            }
            if let Some(ref doc) = vector.metadata_document {
                assert_eq!(
                    digest_document(doc).unwrap(),
                    Sha256Digest::from_hex(&vector.content_digest).unwrap(),
                    "metadata document mismatch for {}",
                    vector.name
                );
            }
        }
    }

    #[tokio::test]
    async fn test_vectors_verify() {
        for vector in reference_vectors() {
            verify_vector(&vector).await.unwrap();
        }
    }

    #[test]
    fn print_vectors_json() {
        #[derive(Serialize)]
        struct VectorFile {
            version: String,
            description: String,
            vectors: Vec<KnownVector>,
        }

        let file = VectorFile {
            version: "0.1.0".to_string(),
            description: "Known-answer vectors for the Mintmark integrity registry."
                .to_string(),
            vectors: reference_vectors(),
        };

        let json = serde_json::to_string_pretty(&file).unwrap();
        println!("{}", json);
    }
}
