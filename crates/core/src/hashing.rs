//! Hashing utilities for notabridge.
//!
//! Every hash in the notarisation hierarchy is double-SHA-256, matching the
//! convention of the participating chains exactly: txids are `sha256d` over
//! the serialized transaction, Merkle parents are `sha256d` over the
//! concatenated 32-byte children.

use alloy_primitives::B256;
use sha2::{Digest, Sha256};

/// Compute double-SHA-256 of the input data.
///
/// # Example
///
/// ```
/// use notabridge_core::hashing::sha256d;
///
/// let digest = sha256d(b"hello");
/// ```
pub fn sha256d(data: &[u8]) -> B256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    B256::from_slice(&second)
}

/// Compute the parent of two Merkle nodes: `sha256d(left || right)`.
///
/// Note: this is positional. Swapping children produces a different parent,
/// which is what the branch index bits encode.
pub fn merkle_parent(left: &B256, right: &B256) -> B256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(left.as_slice());
    data[32..].copy_from_slice(right.as_slice());
    sha256d(&data)
}
