//! Canonical JSON encoding for deterministic digesting.
//!
//! Integrity checking only works if both sides hash identical bytes, so
//! documents are reduced to a canonical form before digesting:
//! - Object keys sorted by UTF-8 byte comparison
//! - Compact output, no whitespace
//! - Strings as raw UTF-8 with standard JSON escaping
//! - Numbers must be integers (floats have no portable canonical form and
//!   are rejected)
//!
//! The registry itself never parses metadata; this module is the helper both
//! the mint authority and verifying clients use to compute content and
//! schema digests.

use serde_json::Value;

use crate::digest::Sha256Digest;
use crate::error::CoreError;

/// Encode a JSON document to canonical bytes.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Digest a JSON document over its canonical encoding.
pub fn digest_document(value: &Value) -> Result<Sha256Digest, CoreError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(Sha256Digest::hash(&bytes))
}

/// Recursively encode a JSON value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => {
            if n.is_f64() {
                return Err(CoreError::NonIntegerNumber(n.to_string()));
            }
            serde_json::to_writer(&mut *buf, n)
                .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        }
        Value::String(s) => {
            serde_json::to_writer(&mut *buf, s)
                .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        }
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                encode_value_to(buf, item)?;
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            // Sort keys by UTF-8 bytes regardless of the map's internal order
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable_by(|a, b| a.as_bytes().cmp(b.as_bytes()));

            buf.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                serde_json::to_writer(&mut *buf, key)
                    .map_err(|e| CoreError::EncodingError(e.to_string()))?;
                buf.push(b':');
                let child = map.get(*key).ok_or_else(|| {
                    CoreError::EncodingError(format!("missing key {}", key))
                })?;
                encode_value_to(buf, child)?;
            }
            buf.push(b'}');
        }
    }
    Ok(())
}
