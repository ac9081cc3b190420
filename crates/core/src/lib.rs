//! # Notabridge Core
//!
//! Core types, constants and hashing utilities for the notabridge federated
//! notarisation system.
//!
//! This crate provides the fundamental building blocks shared by every other
//! notabridge component:
//!
//! - **Hash values**: 32-byte `B256` from Alloy primitives
//! - **Domain types**: `ChainSymbol`, `NotarisationPayload`, `Notarisation`
//! - **Constants**: scan bounds and the cross-chain routing gate
//! - **Hashing**: double-SHA-256 for txids and Merkle nodes

#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod hashing;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use error::{CoreError, Result};
pub use hashing::{merkle_parent, sha256d};
pub use types::*;

// Re-export the hash primitive for convenience
pub use alloy_primitives::B256;
