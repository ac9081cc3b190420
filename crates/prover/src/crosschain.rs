//! Proof extension on the hub: splice an assetchain proof into the target
//! chain's MoMoM.

use alloy_primitives::B256;
use notabridge_core::ChainSymbol;
use notabridge_merkle::MerkleTree;
use tracing::info;

use crate::context::HubContext;
use crate::error::{ProofError, Result};
use crate::proof::TxProof;
use crate::proof_root::calculate_proof_root;
use crate::scan::scan_notarisations_from;

/// Extend an assetchain-level proof so it verifies against the target
/// chain's back-notarisation.
///
/// `source_proof` leads from `source_txid` to the source chain's MoM. The
/// extension locates the target-chain notarisation that first encloses the
/// source notarisation, derives the MoMoM for that interval, and appends the
/// source MoM's path inside it. The returned proof is anchored to the target
/// chain's notarisation txid and executes to the MoMoM.
///
/// Deriving the MoMoM directly at the source notarisation's height would
/// scan backwards from there and could stop before including it; the forward
/// scan to the next target-chain notarisation is what makes the interval
/// inclusive of the source.
pub fn cross_chain_proof<H>(
    hub: &H,
    source_txid: B256,
    target_symbol: &ChainSymbol,
    target_cc_id: u32,
    source_proof: &TxProof,
) -> Result<TxProof>
where
    H: HubContext + ?Sized,
{
    let mom = source_proof.branch.exec(source_txid);

    // Hub height at which the source chain's notarisation confirmed.
    let source_block = hub
        .tx_confirmed(&source_proof.notarisation_txid)
        .map_err(|err| match err {
            ProofError::NotFound(txid) => ProofError::SourceNotarisationMissing(txid),
            other => other,
        })?;

    // First target-chain notarisation at or above it closes the interval.
    let enclosing = scan_notarisations_from(hub, source_block.height, |nota| {
        nota.payload.symbol == *target_symbol
    })?
    .ok_or_else(|| ProofError::NoTargetNotarisationCovering(target_symbol.clone()))?;

    let roots = calculate_proof_root(hub, target_symbol, target_cc_id, enclosing.height)?;

    let index = roots
        .moms
        .iter()
        .position(|m| *m == mom)
        .ok_or(ProofError::MomNotInMomom)?;
    let momom_branch = MerkleTree::from_leaves(roots.moms).branch(index)?;

    let branch = source_proof.branch.then(&momom_branch);
    if branch.exec(source_txid) != roots.momom {
        return Err(ProofError::ProofCheckFailed);
    }

    info!(
        target = %target_symbol,
        momom = %roots.momom,
        "extended proof to cross-chain root"
    );

    Ok(TxProof::new(roots.dest_notarisation_txid, branch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHub;
    use notabridge_core::{Notarisation, NotarisationPayload};
    use notabridge_merkle::MerkleBranch;

    fn symbol(s: &str) -> ChainSymbol {
        ChainSymbol::new(s).unwrap()
    }

    fn nota(sym: &str, seed: u8, mom: B256) -> Notarisation {
        Notarisation {
            txid: B256::repeat_byte(seed),
            payload: NotarisationPayload {
                symbol: symbol(sym),
                mom,
                mom_depth: 4,
                height: 100 + seed as u32,
                cc_id: 2,
                tx_hash: B256::repeat_byte(seed.wrapping_add(0x80)),
            },
        }
    }

    /// One source transaction committed in an A-MoM at hub height 10, then
    /// two B-notarisations bounding B's interval below and above it.
    ///
    /// height  8: nB0
    /// height 10: nA (source MoM)
    /// height 11: unrelated A-MoM
    /// height 14: nB1 (encloses nA)
    struct Fixture {
        hub: MemoryHub,
        txid: B256,
        source_proof: TxProof,
        moms: Vec<B256>,
    }

    fn fixture() -> Fixture {
        let txid = B256::repeat_byte(0x42);
        let peer = B256::repeat_byte(0x43);
        let source_tree = MerkleTree::from_leaves(vec![txid, peer]);
        let source_mom = source_tree.root();
        let other_mom = B256::repeat_byte(0x55);

        let mut hub = MemoryHub::new();
        hub.ledger.add_notarisation(8, nota("B", 0x01, B256::repeat_byte(0x11)));
        let source_nota = nota("A", 0x02, source_mom);
        hub.ledger.add_notarisation(10, source_nota.clone());
        hub.ledger.add_notarisation(11, nota("A", 0x03, other_mom));
        hub.ledger.add_notarisation(14, nota("B", 0x04, B256::repeat_byte(0x22)));
        hub.ledger.ensure_blocks_to(18);

        let source_proof = TxProof::new(source_nota.txid, source_tree.branch(0).unwrap());

        // Interval of B at height 14, scanning back: nothing foreign in 14,
        // the A-MoM at 11, the source A-MoM at 10, closed by nB0 at 8.
        let moms = vec![other_mom, source_mom];

        Fixture {
            hub,
            txid,
            source_proof,
            moms,
        }
    }

    #[test]
    fn test_extends_to_momom() {
        let f = fixture();
        let extended =
            cross_chain_proof(&f.hub, f.txid, &symbol("B"), 2, &f.source_proof).unwrap();

        let momom_tree = MerkleTree::from_leaves(f.moms.clone());
        assert_eq!(extended.branch.exec(f.txid), momom_tree.root());

        // Anchored to nB1, the enclosing B-notarisation.
        assert_eq!(extended.notarisation_txid, B256::repeat_byte(0x04));

        // Source MoM sits at index 1 of the interval; the source branch has
        // one level.
        assert_eq!(
            extended.branch.index(),
            (1 << f.source_proof.branch.len()) | f.source_proof.branch.index()
        );
    }

    #[test]
    fn test_source_notarisation_missing() {
        let f = fixture();
        let bogus = TxProof::new(B256::repeat_byte(0x99), f.source_proof.branch.clone());

        let err = cross_chain_proof(&f.hub, f.txid, &symbol("B"), 2, &bogus).unwrap_err();
        assert!(matches!(err, ProofError::SourceNotarisationMissing(_)));
    }

    #[test]
    fn test_no_enclosing_target_notarisation() {
        let f = fixture();
        let err = cross_chain_proof(&f.hub, f.txid, &symbol("C"), 2, &f.source_proof).unwrap_err();
        assert!(matches!(err, ProofError::NoTargetNotarisationCovering(s) if s.as_str() == "C"));
    }

    #[test]
    fn test_reserved_cc_id_propagates_no_moms() {
        let f = fixture();
        let err = cross_chain_proof(&f.hub, f.txid, &symbol("B"), 1, &f.source_proof).unwrap_err();
        assert!(matches!(err, ProofError::NoMoms));
    }

    #[test]
    fn test_mom_not_in_interval() {
        let mut f = fixture();
        // Drop the source notarisation record (its confirming transaction
        // stays): the interval at nB1 now only carries the unrelated A-MoM.
        f.hub.ledger.blocks[10].notarisations.clear();

        let err = cross_chain_proof(&f.hub, f.txid, &symbol("B"), 2, &f.source_proof).unwrap_err();
        assert!(matches!(err, ProofError::MomNotInMomom));
    }

    #[test]
    fn test_empty_interval_fails_mom_lookup() {
        let mut f = fixture();
        // Strip every foreign record from B's interval: the proof root is
        // still determinate (empty, zero root), so the failure is the MoM
        // lookup, not the root derivation.
        f.hub.ledger.blocks[10].notarisations.clear();
        f.hub.ledger.blocks[11].notarisations.clear();

        let err = cross_chain_proof(&f.hub, f.txid, &symbol("B"), 2, &f.source_proof).unwrap_err();
        assert!(matches!(err, ProofError::MomNotInMomom));
    }

    #[test]
    fn test_tampered_source_proof_fails() {
        let f = fixture();
        // A branch over a different leaf executes to a MoM the interval does
        // not contain.
        let tampered = TxProof::new(
            f.source_proof.notarisation_txid,
            MerkleBranch::new(1, f.source_proof.branch.siblings().to_vec()),
        );

        let err = cross_chain_proof(&f.hub, f.txid, &symbol("B"), 2, &tampered).unwrap_err();
        assert!(matches!(err, ProofError::MomNotInMomom));
    }
}
