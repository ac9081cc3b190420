//! In-memory snapshot implementations of the context traits.
//!
//! These back every test fixture and the offline diagnostics CLI: a chain
//! state is captured as plain data (blocks, notarisations, authorities),
//! loaded from JSON if desired, and handed to the proof operations as an
//! immutable snapshot. Lookups are linear; snapshots are diagnostic-sized.

use alloy_primitives::B256;
use notabridge_core::{sha256d, ChainSymbol, Notarisation, NotarisationsInBlock};
use serde::{Deserialize, Serialize};

use crate::context::{AssetchainContext, BlockIndex, HubContext, LedgerView};
use crate::error::{ProofError, Result};

/// A single block of a snapshot ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    /// Block height.
    pub height: u32,
    /// Block hash.
    pub hash: B256,
    /// Merkle root over the block's transactions.
    #[serde(default)]
    pub merkle_root: B256,
    /// Txids in block order.
    #[serde(default)]
    pub txids: Vec<B256>,
    /// Notarisations carried by the block, in transaction order.
    #[serde(default)]
    pub notarisations: Vec<Notarisation>,
    /// Whether the block's transaction data has been pruned away.
    #[serde(default)]
    pub pruned: bool,
}

impl MemoryBlock {
    /// An empty block at `height` with a deterministic placeholder hash
    /// derived from the ledger tag.
    fn empty(tag: &str, height: u32) -> Self {
        MemoryBlock {
            height,
            hash: placeholder_hash(tag, height),
            merkle_root: B256::ZERO,
            txids: Vec::new(),
            notarisations: Vec::new(),
            pruned: false,
        }
    }
}

fn placeholder_hash(tag: &str, height: u32) -> B256 {
    let mut preimage = Vec::with_capacity(tag.len() + 4);
    preimage.extend_from_slice(tag.as_bytes());
    preimage.extend_from_slice(&height.to_le_bytes());
    sha256d(&preimage)
}

/// A snapshot ledger: an immutable set of blocks with notarisation records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    /// Tag mixed into placeholder block hashes so distinct ledgers never
    /// collide.
    #[serde(default)]
    pub tag: String,
    /// The snapshot's blocks.
    #[serde(default)]
    pub blocks: Vec<MemoryBlock>,
}

impl MemoryLedger {
    /// Create an empty ledger with the given hash tag.
    pub fn named(tag: impl Into<String>) -> Self {
        MemoryLedger {
            tag: tag.into(),
            blocks: Vec::new(),
        }
    }

    /// Add a block, replacing any existing block at the same height.
    pub fn add_block(&mut self, block: MemoryBlock) {
        self.blocks.retain(|b| b.height != block.height);
        self.blocks.push(block);
    }

    /// Make sure every height up to and including `height` has a block,
    /// creating empty placeholder blocks for the gaps.
    pub fn ensure_blocks_to(&mut self, height: u32) {
        for h in 0..=height {
            if self.block_at(h).is_none() {
                self.blocks.push(MemoryBlock::empty(&self.tag, h));
            }
        }
    }

    /// Append a notarisation to the block at `height`, creating the block
    /// (and any gap below it) if needed. The notarisation's txid is recorded
    /// in the block's transaction list.
    pub fn add_notarisation(&mut self, height: u32, notarisation: Notarisation) {
        self.ensure_blocks_to(height);
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.height == height)
            .expect("block exists after ensure_blocks_to");
        block.txids.push(notarisation.txid);
        block.notarisations.push(notarisation);
    }

    fn block_at(&self, height: u32) -> Option<&MemoryBlock> {
        self.blocks.iter().find(|b| b.height == height)
    }

    fn block_by_hash(&self, hash: &B256) -> Option<&MemoryBlock> {
        self.blocks.iter().find(|b| b.hash == *hash)
    }
}

impl LedgerView for MemoryLedger {
    fn tip_height(&self) -> u32 {
        self.blocks.iter().map(|b| b.height).max().unwrap_or(0)
    }

    fn block_hash(&self, height: u32) -> Result<B256> {
        self.block_at(height)
            .map(|b| b.hash)
            .ok_or(ProofError::MissingBlock(height))
    }

    fn notarisations_in_block(&self, block_hash: &B256) -> Result<NotarisationsInBlock> {
        self.block_by_hash(block_hash)
            .map(|b| b.notarisations.clone())
            .ok_or(ProofError::NotFound(*block_hash))
    }

    fn tx_confirmed(&self, txid: &B256) -> Result<BlockIndex> {
        self.blocks
            .iter()
            .find(|b| b.txids.contains(txid))
            .map(|b| BlockIndex {
                height: b.height,
                hash: b.hash,
                merkle_root: b.merkle_root,
            })
            .ok_or(ProofError::NotFound(*txid))
    }
}

/// Hub snapshot: the hub ledger plus the symbol-to-authority mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryHub {
    /// The hub's block snapshot.
    pub ledger: MemoryLedger,
    /// Authority identifier per chain symbol. Unlisted symbols map to 0.
    #[serde(default)]
    pub authorities: Vec<(ChainSymbol, u32)>,
}

impl MemoryHub {
    /// Create an empty hub snapshot.
    pub fn new() -> Self {
        MemoryHub {
            ledger: MemoryLedger::named("hub"),
            authorities: Vec::new(),
        }
    }

    /// Assign a signing authority to a symbol.
    pub fn set_authority(&mut self, symbol: ChainSymbol, authority: u32) {
        self.authorities.retain(|(s, _)| *s != symbol);
        self.authorities.push((symbol, authority));
    }
}

impl LedgerView for MemoryHub {
    fn tip_height(&self) -> u32 {
        self.ledger.tip_height()
    }

    fn block_hash(&self, height: u32) -> Result<B256> {
        self.ledger.block_hash(height)
    }

    fn notarisations_in_block(&self, block_hash: &B256) -> Result<NotarisationsInBlock> {
        self.ledger.notarisations_in_block(block_hash)
    }

    fn tx_confirmed(&self, txid: &B256) -> Result<BlockIndex> {
        self.ledger.tx_confirmed(txid)
    }
}

impl HubContext for MemoryHub {
    fn symbol_authority(&self, symbol: &ChainSymbol) -> u32 {
        self.authorities
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, a)| *a)
            .unwrap_or(0)
    }
}

/// A back-notarisation record keyed by the hub-side notarisation txid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackNotarisationEntry {
    /// Txid of the hub-side notarisation this receipt answers.
    pub hub_txid: B256,
    /// The back-notarisation as confirmed on the assetchain.
    pub notarisation: Notarisation,
}

/// Assetchain snapshot: the local ledger, a hub view, the local symbol and
/// the back-notarisation index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryChain {
    /// Symbol of the local chain.
    pub symbol: ChainSymbol,
    /// The local chain's block snapshot.
    pub ledger: MemoryLedger,
    /// The hub as seen from this chain.
    pub hub: MemoryHub,
    /// Back-notarisation records landed on this chain.
    #[serde(default)]
    pub back_notarisations: Vec<BackNotarisationEntry>,
    /// Txids sitting in the mempool (known but unconfirmed).
    #[serde(default)]
    pub mempool: Vec<B256>,
}

impl MemoryChain {
    /// Create an empty assetchain snapshot around a hub snapshot.
    pub fn new(symbol: ChainSymbol, hub: MemoryHub) -> Self {
        let tag = symbol.as_str().to_string();
        MemoryChain {
            symbol,
            ledger: MemoryLedger::named(tag),
            hub,
            back_notarisations: Vec::new(),
            mempool: Vec::new(),
        }
    }

    /// Add a local block with the given transactions. The block hash is a
    /// deterministic placeholder derived from the chain symbol and height.
    pub fn add_block(&mut self, height: u32, merkle_root: B256, txids: Vec<B256>) {
        self.ledger.add_block(MemoryBlock {
            height,
            hash: placeholder_hash(self.symbol.as_str(), height),
            merkle_root,
            txids,
            notarisations: Vec::new(),
            pruned: false,
        });
    }

    /// Mark a local block's transaction data as pruned.
    pub fn prune_block(&mut self, height: u32) {
        if let Some(block) = self.ledger.blocks.iter_mut().find(|b| b.height == height) {
            block.pruned = true;
        }
    }

    /// Record a transaction as mempool-only.
    pub fn add_mempool_tx(&mut self, txid: B256) {
        self.mempool.push(txid);
    }

    /// Record a back-notarisation receipt for a hub notarisation txid.
    pub fn add_back_notarisation(&mut self, hub_txid: B256, notarisation: Notarisation) {
        self.back_notarisations.push(BackNotarisationEntry {
            hub_txid,
            notarisation,
        });
    }
}

impl LedgerView for MemoryChain {
    fn tip_height(&self) -> u32 {
        self.ledger.tip_height()
    }

    fn block_hash(&self, height: u32) -> Result<B256> {
        self.ledger.block_hash(height)
    }

    fn notarisations_in_block(&self, block_hash: &B256) -> Result<NotarisationsInBlock> {
        self.ledger.notarisations_in_block(block_hash)
    }

    fn tx_confirmed(&self, txid: &B256) -> Result<BlockIndex> {
        self.ledger.tx_confirmed(txid)
    }
}

impl AssetchainContext for MemoryChain {
    fn self_symbol(&self) -> &ChainSymbol {
        &self.symbol
    }

    fn hub(&self) -> &dyn LedgerView {
        &self.hub
    }

    fn transaction_block(&self, txid: &B256) -> Result<Option<B256>> {
        if let Ok(index) = self.ledger.tx_confirmed(txid) {
            return Ok(Some(index.hash));
        }
        if self.mempool.contains(txid) {
            return Ok(None);
        }
        Err(ProofError::NotFound(*txid))
    }

    fn block_index(&self, block_hash: &B256) -> Result<BlockIndex> {
        self.ledger
            .block_by_hash(block_hash)
            .map(|b| BlockIndex {
                height: b.height,
                hash: b.hash,
                merkle_root: b.merkle_root,
            })
            .ok_or(ProofError::NotFound(*block_hash))
    }

    fn block_merkle_root(&self, height: u32) -> Result<B256> {
        self.ledger
            .block_at(height)
            .map(|b| b.merkle_root)
            .ok_or(ProofError::MissingBlock(height))
    }

    fn block_transactions(&self, block: &BlockIndex) -> Result<Vec<B256>> {
        let found = self
            .ledger
            .block_by_hash(&block.hash)
            .ok_or(ProofError::MissingBlock(block.height))?;
        if found.pruned {
            return Err(ProofError::Pruned(found.height));
        }
        Ok(found.txids.clone())
    }

    fn back_notarisation(&self, hub_notarisation_txid: &B256) -> Result<Notarisation> {
        self.back_notarisations
            .iter()
            .find(|entry| entry.hub_txid == *hub_notarisation_txid)
            .map(|entry| entry.notarisation.clone())
            .ok_or(ProofError::NotFound(*hub_notarisation_txid))
    }
}
