//! Proptest generators for property-based testing.

use proptest::prelude::*;

use mintmark_core::{Sha256Digest, TokenId, TokenRecord};
use mintmark_gate::{Keypair, Principal};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random non-zero principal.
pub fn principal() -> impl Strategy<Value = Principal> {
    keypair().prop_map(|kp| kp.principal())
}

/// Generate a random token identifier.
pub fn token_id() -> impl Strategy<Value = TokenId> {
    any::<u64>().prop_map(TokenId::new)
}

/// Generate a random digest.
pub fn digest() -> impl Strategy<Value = Sha256Digest> {
    any::<[u8; 32]>().prop_map(Sha256Digest::from_bytes)
}

/// Generate a metadata locator.
pub fn locator() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}(/[a-z0-9]{1,8}){0,3}"
        .prop_map(|path| format!("https://example.foo/{}", path))
}

/// Generate a full token record.
pub fn token_record() -> impl Strategy<Value = TokenRecord> {
    (locator(), digest()).prop_map(|(locator, digest)| TokenRecord::new(locator, digest))
}
