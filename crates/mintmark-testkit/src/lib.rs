//! # Mintmark Testkit
//!
//! Testing utilities for the Mintmark registry: ready-made fixtures,
//! proptest generators, and known-answer vectors that every deployment of
//! the integrity surface must reproduce.

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::TestFixture;
pub use vectors::{reference_vectors, KnownVector};
