//! Error types for the capability gate.

use thiserror::Error;

use crate::principal::Principal;

/// Errors from gate checks.
#[derive(Debug, Error)]
pub enum GateError {
    /// The principal is not authorized to mint.
    #[error("principal {principal} is not authorized to mint")]
    NotAuthorized {
        /// The principal that failed the check.
        principal: Principal,
    },
}

/// Result type for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;
