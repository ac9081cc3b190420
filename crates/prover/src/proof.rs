//! Transaction proofs.

use alloy_primitives::B256;
use notabridge_merkle::MerkleBranch;
use serde::{Deserialize, Serialize};

/// A proof that a transaction reaches a committed root.
///
/// `notarisation_txid` names the notarisation the proof verifies against:
/// for an assetchain-level proof the branch recomputes that notarisation's
/// MoM, for an extended cross-chain proof it recomputes the MoMoM of the
/// target chain's back-notarisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxProof {
    /// Txid of the notarisation this proof is anchored to.
    pub notarisation_txid: B256,
    /// Authentication path from the transaction to the committed root.
    pub branch: MerkleBranch,
}

impl TxProof {
    /// Create a proof from its parts.
    pub fn new(notarisation_txid: B256, branch: MerkleBranch) -> Self {
        Self {
            notarisation_txid,
            branch,
        }
    }

    /// Whether executing the branch on `txid` reproduces `root`.
    pub fn verifies(&self, txid: B256, root: B256) -> bool {
        self.branch.exec(txid) == root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notabridge_merkle::MerkleTree;

    #[test]
    fn test_verifies_against_root() {
        let leaves: Vec<B256> = (1..=3).map(B256::repeat_byte).collect();
        let tree = MerkleTree::from_leaves(leaves.clone());
        let proof = TxProof::new(B256::repeat_byte(0xee), tree.branch(1).unwrap());

        assert!(proof.verifies(leaves[1], tree.root()));
        assert!(!proof.verifies(leaves[0], tree.root()));
        assert!(!proof.verifies(leaves[1], B256::ZERO));
    }

    #[test]
    fn test_json_roundtrip() {
        let tree = MerkleTree::from_leaves(vec![B256::repeat_byte(1), B256::repeat_byte(2)]);
        let proof = TxProof::new(B256::repeat_byte(0xaa), tree.branch(0).unwrap());

        let json = serde_json::to_string(&proof).unwrap();
        let back: TxProof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, back);
    }
}
