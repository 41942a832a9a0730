//! Mint authorization gates.
//!
//! The registry calls [`MintGate::check_mint`] before any record creation.
//! A gate either clears the principal or returns the denial; it never
//! mutates registry state.

use std::collections::HashSet;

use crate::error::{GateError, Result};
use crate::principal::Principal;

/// The authorization seam between callers and the registry core.
///
/// Implementations decide who may create records. The core only depends on
/// the yes/no answer, so single-owner, role-list, and wide-open schemes are
/// all interchangeable.
pub trait MintGate: Send + Sync {
    /// Clear `principal` for record creation, or return the denial.
    fn check_mint(&self, principal: &Principal) -> Result<()>;
}

/// Gate that authorizes exactly one owner principal.
///
/// The default deployment scheme: the deployer keeps the only mint
/// capability.
#[derive(Debug, Clone)]
pub struct SingleOwnerGate {
    owner: Principal,
}

impl SingleOwnerGate {
    /// Create a gate cleared only for `owner`.
    pub fn new(owner: Principal) -> Self {
        Self { owner }
    }

    /// The authorized owner.
    pub fn owner(&self) -> &Principal {
        &self.owner
    }
}

impl MintGate for SingleOwnerGate {
    fn check_mint(&self, principal: &Principal) -> Result<()> {
        if *principal == self.owner {
            Ok(())
        } else {
            Err(GateError::NotAuthorized {
                principal: *principal,
            })
        }
    }
}

/// Gate that authorizes a fixed set of principals.
///
/// Covers role-list deployments where several authorities share the mint
/// capability.
#[derive(Debug, Clone, Default)]
pub struct OwnerSetGate {
    owners: HashSet<Principal>,
}

impl OwnerSetGate {
    /// Create a gate cleared for the given principals.
    pub fn new(owners: impl IntoIterator<Item = Principal>) -> Self {
        Self {
            owners: owners.into_iter().collect(),
        }
    }

    /// Number of authorized principals.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether the set is empty (a gate nobody passes).
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl MintGate for OwnerSetGate {
    fn check_mint(&self, principal: &Principal) -> Result<()> {
        if self.owners.contains(principal) {
            Ok(())
        } else {
            Err(GateError::NotAuthorized {
                principal: *principal,
            })
        }
    }
}

/// Gate that clears every principal. For tests and local tooling only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl MintGate for OpenGate {
    fn check_mint(&self, _principal: &Principal) -> Result<()> {
        Ok(())
    }
}
