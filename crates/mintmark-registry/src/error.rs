//! Error types for the Registry.
//!
//! Every variant carries a stable six-digit code via [`RegistryError::code`]
//! so automated clients branch on the code rather than parsing message text.
//! The `003xxx` and `018xxx` blocks follow the numbering family of the
//! contract system this registry interoperates with; `019xxx` covers
//! lifecycle and backend failures.

use thiserror::Error;

use mintmark_core::TokenId;
use mintmark_gate::{GateError, Principal};
use mintmark_store::StoreError;

/// Errors that can occur during Registry operations.
///
/// All errors are terminal for the call that raised them: the operation
/// aborts with no partial state change.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Operation attempted before `initialize`.
    #[error("registry is not initialized")]
    NotInitialized,

    /// Second `initialize` on an already-initialized registry.
    #[error("registry is already initialized")]
    AlreadyInitialized,

    /// The minter failed the capability gate.
    #[error("principal {principal} is not authorized to mint")]
    NotAuthorized {
        /// The principal that failed the gate.
        principal: Principal,
    },

    /// The zero principal was given as the owner target.
    #[error("owner target must not be the zero principal")]
    InvalidOwner,

    /// A record already exists for this identifier.
    #[error("token {0} already exists")]
    TokenExists(TokenId),

    /// No record exists for this identifier.
    #[error("unknown token {0}")]
    UnknownToken(TokenId),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// The stable machine-checkable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            RegistryError::NotInitialized => "019001",
            RegistryError::AlreadyInitialized => "019002",
            RegistryError::NotAuthorized { .. } => "018001",
            RegistryError::InvalidOwner => "003001",
            RegistryError::TokenExists(_) => "003006",
            RegistryError::UnknownToken(_) => "003002",
            RegistryError::Store(_) => "019003",
        }
    }
}

impl From<GateError> for RegistryError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::NotAuthorized { principal } => {
                RegistryError::NotAuthorized { principal }
            }
        }
    }
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
