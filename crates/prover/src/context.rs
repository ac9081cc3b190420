//! Capability traits giving the core read access to chain state.
//!
//! The proof algorithms never touch ambient globals. Each operation receives
//! a context value representing an immutable snapshot of the ledgers it
//! needs; a reorg racing the snapshot surfaces as a clean error from the
//! implementation (typically [`ProofError::MissingBlock`]) rather than a torn
//! read.
//!
//! [`ProofError::MissingBlock`]: crate::error::ProofError::MissingBlock

use alloy_primitives::B256;
use notabridge_core::{ChainSymbol, Notarisation, NotarisationsInBlock};

use crate::error::Result;

/// Location of a confirmed transaction's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockIndex {
    /// Block height.
    pub height: u32,
    /// Block hash.
    pub hash: B256,
    /// Merkle root over the block's transactions.
    pub merkle_root: B256,
}

/// Snapshot view of a ledger carrying notarisation records.
///
/// Implementations must answer all reads from the same chain snapshot for
/// the lifetime of the value; the scan algorithms rely on `tip_height` and
/// `block_hash` agreeing with each other.
pub trait LedgerView {
    /// Height of the snapshot's best block.
    fn tip_height(&self) -> u32;

    /// Hash of the block at `height`.
    fn block_hash(&self, height: u32) -> Result<B256>;

    /// Notarisations in the given block, in transaction order. Empty for
    /// blocks carrying none.
    fn notarisations_in_block(&self, block_hash: &B256) -> Result<NotarisationsInBlock>;

    /// Resolve a confirmed transaction to its block. Fails with `NotFound`
    /// for unknown txids.
    fn tx_confirmed(&self, txid: &B256) -> Result<BlockIndex>;
}

/// Hub-side capabilities: the hub ledger plus the signing-authority mapping.
pub trait HubContext: LedgerView {
    /// Signing-authority identifier for a chain symbol. Pure; only chains
    /// sharing an authority are aggregated into one MoMoM.
    fn symbol_authority(&self, symbol: &ChainSymbol) -> u32;
}

/// Assetchain-side capabilities.
///
/// The assetchain's own ledger (which carries its back-notarisation records)
/// is exposed through the [`LedgerView`] supertrait; the hub is reachable as
/// a second ledger view for covering-notarisation scans.
pub trait AssetchainContext: LedgerView {
    /// Symbol of the local chain.
    fn self_symbol(&self) -> &ChainSymbol;

    /// View of the hub chain as seen from this assetchain.
    fn hub(&self) -> &dyn LedgerView;

    /// Locate a transaction: `Some(block_hash)` if confirmed, `None` while
    /// still in the mempool, `NotFound` if unknown.
    fn transaction_block(&self, txid: &B256) -> Result<Option<B256>>;

    /// Index entry for a local block hash.
    fn block_index(&self, block_hash: &B256) -> Result<BlockIndex>;

    /// Merkle root of the local block at `height`.
    fn block_merkle_root(&self, height: u32) -> Result<B256>;

    /// Txids of the block's transactions, in block order. Fails with
    /// `Pruned` when the block data is no longer held locally.
    fn block_transactions(&self, block: &BlockIndex) -> Result<Vec<B256>>;

    /// Back-notarisation record keyed by the hub-side notarisation txid.
    fn back_notarisation(&self, hub_notarisation_txid: &B256) -> Result<Notarisation>;
}
