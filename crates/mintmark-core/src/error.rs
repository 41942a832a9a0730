//! Error types for Mintmark core primitives.

use thiserror::Error;

/// Errors from digest and canonicalization operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid digest length: {0} bytes, expected 32")]
    InvalidDigestLength(usize),

    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("non-integer number in document: {0}")]
    NonIntegerNumber(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}
