//! Error types for proof construction.
//!
//! Every failure mode has its own kind and none is retriable from inside the
//! core: a partially constructed proof is never returned.

use alloy_primitives::B256;
use notabridge_merkle::MerkleError;
use thiserror::Error;

/// Proof construction error type.
#[derive(Error, Debug)]
pub enum ProofError {
    /// Referenced transaction or notarisation is not in the indices.
    #[error("Transaction or notarisation {0} not found")]
    NotFound(B256),

    /// Referenced transaction exists only in the mempool.
    #[error("Transaction {0} is still in the mempool")]
    Unconfirmed(B256),

    /// No notarisation covering the referenced block height has landed yet.
    #[error("No notarisation covers block height {0} yet")]
    NotYetConfirmed(u32),

    /// The located notarisation's MoM window does not contain the
    /// transaction's block height.
    #[error(
        "Notarisation at height {notarised_height} with depth {mom_depth} \
         does not cover block height {tx_height}"
    )]
    CoverageMismatch {
        /// Highest height committed by the notarisation.
        notarised_height: u32,
        /// Number of block roots the notarisation commits.
        mom_depth: u32,
        /// Height of the transaction's block.
        tx_height: u32,
    },

    /// Block data has been pruned locally.
    #[error("Block data at height {0} has been pruned")]
    Pruned(u32),

    /// Import or burn transaction marshalling failed.
    #[error("Malformed import data: {0}")]
    Malformed(String),

    /// The source proof's notarisation txid is not confirmed on the hub.
    #[error("Source notarisation {0} not confirmed on the hub")]
    SourceNotarisationMissing(B256),

    /// Forward scan found no target-chain notarisation enclosing the source
    /// notarisation within the scan window.
    #[error("No {0} notarisation encloses the source notarisation within the scan window")]
    NoTargetNotarisationCovering(notabridge_core::ChainSymbol),

    /// No determinate MoMoM range: fewer than two own-symbol notarisations in
    /// the scan window, a reserved `cc_id`, or a reference height above the
    /// tip.
    #[error("Cannot determine a MoMoM range for the requested interval")]
    NoMoms,

    /// The source MoM is not among the MoMs collected for the interval.
    #[error("Source MoM not present in the MoMoM set")]
    MomNotInMomom,

    /// Transaction missing from its own block's transaction list.
    #[error("Transaction {0} not present in its confirming block")]
    TxNotInBlock(B256),

    /// The block-to-MoM branch does not recompute the notarised MoM.
    #[error("Block branch does not recompute the notarised MoM")]
    MomMismatch,

    /// The transaction-to-block branch does not recompute the block's
    /// Merkle root.
    #[error("Transaction branch does not recompute the block Merkle root")]
    TxBranchMismatch,

    /// Final verification of a concatenated branch failed.
    #[error("Combined proof does not recompute the expected root")]
    ProofCheckFailed,

    /// The chain snapshot has no block at the requested height; the view is
    /// inconsistent (e.g. a reorg raced the read).
    #[error("Block at height {0} missing from the chain snapshot")]
    MissingBlock(u32),

    /// Merkle-level failure.
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// Result type alias for ProofError.
pub type Result<T> = std::result::Result<T, ProofError>;
