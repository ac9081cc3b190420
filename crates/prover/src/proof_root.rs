//! MoMoM derivation: the Merkle root over foreign MoMs landed between two
//! notarisations of one chain.

use alloy_primitives::B256;
use notabridge_core::{ChainSymbol, MIN_PROOF_CC_ID, SCAN_LIMIT_BLOCKS};
use notabridge_merkle::MerkleTree;
use tracing::debug;

use crate::context::HubContext;
use crate::error::{ProofError, Result};

/// The MoMoM of one notarisation interval of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofRoot {
    /// Merkle root over `moms`; zero when the interval holds none.
    pub momom: B256,
    /// The collected foreign MoMs, in scan-back order (descending hub
    /// height, transaction order within a block). This is the exact leaf
    /// order of `momom`.
    pub moms: Vec<B256>,
    /// Hub txid of the chain's own notarisation bounding the interval from
    /// above.
    pub dest_notarisation_txid: B256,
}

/// Derive the MoMoM for the notarisation interval of `symbol` that is open
/// at `hub_height`.
///
/// Notaries do not wait for hub confirmation before back-notarising, so the
/// interval has to be determinable from any reference height at or above the
/// chain's latest notarisation: the walk goes backwards from `hub_height`
/// until two `symbol` notarisations have been seen. Foreign MoMs collected
/// from the block carrying the first one (inclusive) down to the block
/// carrying the second (exclusive) form the leaves.
///
/// Within one block only the first `symbol` notarisation bounds the
/// interval, and own-symbol records are never collected as leaves; the MoMoM
/// commits foreign chains only. A collected notarisation must share the
/// signing authority of `symbol` and carry exactly `target_cc_id`.
///
/// Fails with [`ProofError::NoMoms`] whenever no determinate interval
/// exists: `target_cc_id` below [`MIN_PROOF_CC_ID`], `hub_height` above the
/// snapshot tip, or fewer than two own notarisations inside the scan
/// window. A determined interval that collected no foreign MoMs still
/// succeeds, with empty leaves and the zero root.
pub fn calculate_proof_root<H>(
    hub: &H,
    symbol: &ChainSymbol,
    target_cc_id: u32,
    hub_height: u32,
) -> Result<ProofRoot>
where
    H: HubContext + ?Sized,
{
    if target_cc_id < MIN_PROOF_CC_ID {
        return Err(ProofError::NoMoms);
    }
    if hub_height > hub.tip_height() {
        return Err(ProofError::NoMoms);
    }

    let authority = hub.symbol_authority(symbol);
    let mut own_seen = 0u32;
    let mut dest_notarisation_txid = None;
    let mut moms = Vec::new();
    let mut interval_closed = false;

    for i in 0..SCAN_LIMIT_BLOCKS {
        let Some(height) = hub_height.checked_sub(i) else {
            break;
        };
        let block_hash = hub.block_hash(height)?;
        let notarisations = hub.notarisations_in_block(&block_hash)?;
        if notarisations.is_empty() {
            continue;
        }

        // Only the first own-symbol notarisation in a block bounds the
        // interval.
        if let Some(own) = notarisations
            .iter()
            .find(|n| n.payload.symbol == *symbol)
        {
            own_seen += 1;
            if own_seen == 1 {
                debug!(height, txid = %own.txid, %symbol, "interval upper bound");
                dest_notarisation_txid = Some(own.txid);
            } else {
                debug!(height, %symbol, "interval lower bound");
                interval_closed = true;
                break;
            }
        }

        // Collect foreign MoMs once the upper bound has been seen, including
        // from the block that carries it.
        if own_seen == 1 {
            for nota in &notarisations {
                if nota.payload.symbol == *symbol {
                    continue;
                }
                if hub.symbol_authority(&nota.payload.symbol) == authority
                    && nota.payload.cc_id == target_cc_id
                {
                    debug!(height, mom = %nota.payload.mom, source = %nota.payload.symbol, "collected MoM");
                    moms.push(nota.payload.mom);
                }
            }
        }
    }

    let Some(dest_notarisation_txid) = dest_notarisation_txid.filter(|_| interval_closed)
    else {
        return Err(ProofError::NoMoms);
    };

    let momom = MerkleTree::from_leaves(moms.clone()).root();
    Ok(ProofRoot {
        momom,
        moms,
        dest_notarisation_txid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHub;
    use notabridge_core::{Notarisation, NotarisationPayload};

    fn symbol(s: &str) -> ChainSymbol {
        ChainSymbol::new(s).unwrap()
    }

    fn nota(sym: &str, cc_id: u32, seed: u8) -> Notarisation {
        Notarisation {
            txid: B256::repeat_byte(seed),
            payload: NotarisationPayload {
                symbol: symbol(sym),
                mom: B256::repeat_byte(seed.wrapping_add(0x40)),
                mom_depth: 4,
                height: 100 + seed as u32,
                cc_id,
                tx_hash: B256::repeat_byte(seed.wrapping_add(0x80)),
            },
        }
    }

    /// Hub with, at descending heights: b1 b2 b3 between two A-notarisations,
    /// and one earlier B-notarisation below the interval.
    ///
    /// height 20: nA1      (upper bound, at the reference height)
    /// height 18: b1, b2
    /// height 15: b3
    /// height 12: nA0      (lower bound)
    /// height 10: b0       (outside the interval)
    fn interval_hub() -> MemoryHub {
        let mut hub = MemoryHub::new();
        hub.ledger.add_notarisation(10, nota("B", 2, 0x05));
        hub.ledger.add_notarisation(12, nota("A", 2, 0x0a));
        hub.ledger.add_notarisation(15, nota("B", 2, 0x03));
        hub.ledger.add_notarisation(18, nota("B", 2, 0x01));
        hub.ledger.add_notarisation(18, nota("B", 2, 0x02));
        hub.ledger.add_notarisation(20, nota("A", 2, 0x0b));
        hub.ledger.ensure_blocks_to(25);
        hub
    }

    #[test]
    fn test_happy_path_interval() {
        let hub = interval_hub();
        let root = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap();

        // Scan-back order: block 18 in tx order, then block 15. b0 excluded.
        let expected_moms = vec![
            nota("B", 2, 0x01).payload.mom,
            nota("B", 2, 0x02).payload.mom,
            nota("B", 2, 0x03).payload.mom,
        ];
        assert_eq!(root.moms, expected_moms);
        assert_eq!(root.dest_notarisation_txid, B256::repeat_byte(0x0b));
        assert_eq!(root.momom, MerkleTree::from_leaves(expected_moms).root());
    }

    #[test]
    fn test_reference_height_above_upper_bound() {
        // Starting the walk above the latest A-notarisation lands on the same
        // interval.
        let hub = interval_hub();
        let at_bound = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap();
        let above = calculate_proof_root(&hub, &symbol("A"), 2, 25).unwrap();
        assert_eq!(above, at_bound);
    }

    #[test]
    fn test_insufficient_own_notarisations() {
        let mut hub = MemoryHub::new();
        hub.ledger.add_notarisation(12, nota("B", 2, 0x01));
        hub.ledger.add_notarisation(15, nota("A", 2, 0x0a));
        hub.ledger.ensure_blocks_to(20);

        let err = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap_err();
        assert!(matches!(err, ProofError::NoMoms));
    }

    #[test]
    fn test_reserved_cc_id_is_rejected() {
        let hub = interval_hub();
        for cc_id in [0, 1] {
            let err = calculate_proof_root(&hub, &symbol("A"), cc_id, 20).unwrap_err();
            assert!(matches!(err, ProofError::NoMoms));
        }
    }

    #[test]
    fn test_height_above_tip_is_rejected() {
        let hub = interval_hub();
        let err = calculate_proof_root(&hub, &symbol("A"), 2, 26).unwrap_err();
        assert!(matches!(err, ProofError::NoMoms));
    }

    #[test]
    fn test_cc_id_filter_drops_foreign_tags() {
        let mut hub = interval_hub();
        // A co-authority notarisation with a different routing tag must not
        // contribute a leaf.
        hub.ledger.add_notarisation(19, nota("B", 3, 0x07));

        let root = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap();
        assert!(!root.moms.contains(&nota("B", 3, 0x07).payload.mom));
        assert_eq!(root.moms.len(), 3);
    }

    #[test]
    fn test_authority_filter() {
        let mut hub = interval_hub();
        hub.set_authority(symbol("C"), 9);
        hub.ledger.add_notarisation(19, nota("C", 2, 0x08));

        let root = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap();
        assert!(!root.moms.contains(&nota("C", 2, 0x08).payload.mom));
    }

    #[test]
    fn test_two_own_notarisations_in_one_block() {
        // Only the first own-symbol notarisation per block advances the
        // interval bound; the second is neither a bound nor a leaf.
        let mut hub = MemoryHub::new();
        hub.ledger.add_notarisation(8, nota("A", 2, 0x0a));
        hub.ledger.add_notarisation(12, nota("A", 2, 0x0b));
        hub.ledger.add_notarisation(12, nota("A", 2, 0x0c));
        hub.ledger.add_notarisation(12, nota("B", 2, 0x01));
        hub.ledger.ensure_blocks_to(15);

        let root = calculate_proof_root(&hub, &symbol("A"), 2, 15).unwrap();
        assert_eq!(root.dest_notarisation_txid, B256::repeat_byte(0x0b));
        assert_eq!(root.moms, vec![nota("B", 2, 0x01).payload.mom]);
    }

    #[test]
    fn test_empty_interval_has_zero_root() {
        // Two adjacent A-notarisations with nothing between them: the
        // interval is determinate, just empty, so the call succeeds with no
        // leaves and the zero root.
        let mut hub = MemoryHub::new();
        hub.ledger.add_notarisation(9, nota("A", 2, 0x0a));
        hub.ledger.add_notarisation(10, nota("A", 2, 0x0b));
        hub.ledger.ensure_blocks_to(12);

        let root = calculate_proof_root(&hub, &symbol("A"), 2, 11).unwrap();
        assert!(root.moms.is_empty());
        assert_eq!(root.momom, B256::ZERO);
        assert_eq!(root.dest_notarisation_txid, B256::repeat_byte(0x0b));
    }

    #[test]
    fn test_walk_stops_at_genesis() {
        // Reference height near genesis: the backward walk must stop at
        // height 0 without underflow, then report an indeterminate interval.
        let mut hub = MemoryHub::new();
        hub.ledger.add_notarisation(1, nota("A", 2, 0x0a));
        hub.ledger.ensure_blocks_to(3);

        let err = calculate_proof_root(&hub, &symbol("A"), 2, 2).unwrap_err();
        assert!(matches!(err, ProofError::NoMoms));
    }

    #[test]
    fn test_deterministic_over_snapshot() {
        let hub = interval_hub();
        let a = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap();
        let b = calculate_proof_root(&hub, &symbol("A"), 2, 20).unwrap();
        assert_eq!(a, b);
    }
}
