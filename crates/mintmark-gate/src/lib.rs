//! # Mintmark Gate
//!
//! The capability gate that guards record creation. The registry core asks
//! one question before a mint proceeds: may this principal create records?
//! Any scheme that answers yes/no satisfies the contract; this crate ships
//! the common ones.
//!
//! ## Key Types
//!
//! - [`Principal`] - 32-byte caller identity, derived from an Ed25519 key
//! - [`Keypair`] - Identity generation for authorities and fixtures
//! - [`MintGate`] - The authorization seam the registry calls through
//! - [`SingleOwnerGate`] / [`OwnerSetGate`] / [`OpenGate`] - Concrete gates

pub mod error;
pub mod gate;
pub mod principal;

pub use error::GateError;
pub use gate::{MintGate, OpenGate, OwnerSetGate, SingleOwnerGate};
pub use principal::{Keypair, Principal};
