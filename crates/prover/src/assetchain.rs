//! Source-side proof assembly: from a local transaction up to the MoM of the
//! hub notarisation covering its block.

use alloy_primitives::B256;
use notabridge_core::Notarisation;
use notabridge_merkle::MerkleTree;
use tracing::debug;

use crate::context::AssetchainContext;
use crate::error::{ProofError, Result};
use crate::proof::TxProof;
use crate::scan::scan_notarisations_from;

/// Build a proof from a confirmed local transaction to the MoM of the first
/// hub notarisation covering its block.
///
/// The resulting branch concatenates the transaction's in-block path with the
/// block's path inside the MoM; executing it on the txid reproduces the
/// notarised MoM. The proof is anchored to the notarisation's source-side
/// txid (`payload.tx_hash`) so it can later be resolved against the hub.
///
/// MoM leaves are ordered from the notarised height downwards: leaf 0 is the
/// Merkle root of the highest committed block, leaf `mom_depth - 1` that of
/// the lowest.
pub fn assetchain_proof<C>(ctx: &C, txid: B256) -> Result<TxProof>
where
    C: AssetchainContext + ?Sized,
{
    let block_hash = ctx
        .transaction_block(&txid)?
        .ok_or(ProofError::Unconfirmed(txid))?;
    let block = ctx.block_index(&block_hash)?;
    let tx_height = block.height;

    // The first own-symbol notarisation at or above the block height carries
    // the covering MoM, assuming notarisations land in height order.
    let own_symbol = ctx.self_symbol().clone();
    let covering = scan_notarisations_from(ctx.hub(), tx_height, |nota| {
        nota.payload.symbol == own_symbol && nota.payload.height >= tx_height
    })?
    .ok_or(ProofError::NotYetConfirmed(tx_height))?;
    let payload = covering.notarisation.payload;
    debug!(
        hub_height = covering.height,
        notarised_height = payload.height,
        mom_depth = payload.mom_depth,
        "found covering notarisation"
    );

    // Sequencing is an assumption, not an invariant: confirm the MoM window
    // actually contains the transaction's block.
    let covered = payload.mom_depth > 0
        && tx_height <= payload.height
        && payload
            .height
            .checked_sub(payload.mom_depth - 1)
            .is_some_and(|lowest| tx_height >= lowest);
    if !covered {
        return Err(ProofError::CoverageMismatch {
            notarised_height: payload.height,
            mom_depth: payload.mom_depth,
            tx_height,
        });
    }

    // Block's leaf position inside the MoM, then the block→MoM branch.
    let block_offset = payload.height - tx_height;
    let mut leaves = Vec::with_capacity(payload.mom_depth as usize);
    for i in 0..payload.mom_depth {
        leaves.push(ctx.block_merkle_root(payload.height - i)?);
    }
    let mom_branch = MerkleTree::from_leaves(leaves).branch(block_offset as usize)?;
    if mom_branch.exec(block.merkle_root) != payload.mom {
        return Err(ProofError::MomMismatch);
    }

    // Transaction's in-block branch.
    let txids = ctx.block_transactions(&block)?;
    let tx_index = txids
        .iter()
        .position(|t| *t == txid)
        .ok_or(ProofError::TxNotInBlock(txid))?;
    let tx_branch = MerkleTree::from_leaves(txids).branch(tx_index)?;
    if tx_branch.exec(txid) != block.merkle_root {
        return Err(ProofError::TxBranchMismatch);
    }

    // Concatenate and confirm the combined path end to end.
    let branch = tx_branch.then(&mom_branch);
    if branch.exec(txid) != payload.mom {
        return Err(ProofError::ProofCheckFailed);
    }

    Ok(TxProof::new(payload.tx_hash, branch))
}

/// Find the back-notarisation succeeding the one answering
/// `hub_notarisation_txid`.
///
/// The receipt for a hub notarisation carries the MoMoM of the *previous*
/// interval; the MoMoM covering that notarisation arrives with the next
/// own-symbol record. Resolve the receipt, find its local confirmation
/// height, and scan the local ledger forward from the following block.
pub fn next_back_notarisation<C>(ctx: &C, hub_notarisation_txid: B256) -> Result<Notarisation>
where
    C: AssetchainContext + ?Sized,
{
    let receipt = ctx.back_notarisation(&hub_notarisation_txid)?;
    let block = ctx.tx_confirmed(&receipt.txid)?;

    let own_symbol = ctx.self_symbol().clone();
    scan_notarisations_from(ctx, block.height + 1, |nota| {
        nota.payload.symbol == own_symbol
    })?
    .map(|found| found.notarisation)
    .ok_or(ProofError::NotYetConfirmed(block.height + 1))
}
