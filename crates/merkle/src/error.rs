//! Error types for the merkle crate.

use thiserror::Error;

/// Merkle error type.
#[derive(Error, Debug)]
pub enum MerkleError {
    /// Requested a branch for a leaf index the tree does not contain.
    #[error("Leaf index {index} out of range for tree of {leaves} leaves")]
    LeafOutOfRange {
        /// The requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        leaves: usize,
    },
}

/// Result type alias for MerkleError.
pub type Result<T> = std::result::Result<T, MerkleError>;
