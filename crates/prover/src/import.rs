//! Import completion: extend the proof carried by an import transaction from
//! the assetchain level to the cross-chain root.

use alloy_primitives::B256;
use notabridge_core::{ChainSymbol, RawOutput, RawTransaction};
use serde::{Deserialize, Serialize};

use crate::context::HubContext;
use crate::crosschain::cross_chain_proof;
use crate::error::Result;
use crate::proof::TxProof;

/// Parsed pieces of an import transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportParts {
    /// Proof carried by the import (assetchain level on arrival).
    pub proof: TxProof,
    /// The burn transaction on the source chain.
    pub burn_tx: RawTransaction,
    /// Outputs to be created by the import.
    pub payouts: Vec<RawOutput>,
}

/// Parsed pieces of a burn transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnParts {
    /// Chain the burned value is imported to.
    pub target_symbol: ChainSymbol,
    /// Cross-chain routing tag of the target.
    pub target_cc_id: u32,
    /// Commitment to the import's payouts.
    pub payouts_hash: B256,
}

/// Marshalling collaborator for import and burn transactions.
///
/// Wire formats live outside the core; implementations signal parse failures
/// with [`ProofError::Malformed`].
///
/// [`ProofError::Malformed`]: crate::error::ProofError::Malformed
pub trait ImportCodec {
    /// Split an import transaction into proof, burn transaction and payouts.
    fn unmarshal_import(&self, import_tx: &RawTransaction) -> Result<ImportParts>;

    /// Parse the target routing data out of a burn transaction.
    fn unmarshal_burn(&self, burn_tx: &RawTransaction) -> Result<BurnParts>;

    /// Rebuild an import transaction around an extended proof.
    fn marshal_import(
        &self,
        proof: &TxProof,
        burn_tx: &RawTransaction,
        payouts: &[RawOutput],
    ) -> Result<RawTransaction>;
}

/// Complete an import transaction whose proof still ends at the source
/// chain's MoM.
///
/// Pure orchestration: unmarshal, extend the proof through the target
/// chain's MoMoM via [`cross_chain_proof`], and remarshal. The burn
/// transaction's txid is the leaf the extended proof commits to.
pub fn complete_import<H, M>(hub: &H, codec: &M, import_tx: &RawTransaction) -> Result<RawTransaction>
where
    H: HubContext + ?Sized,
    M: ImportCodec + ?Sized,
{
    let parts = codec.unmarshal_import(import_tx)?;
    let burn = codec.unmarshal_burn(&parts.burn_tx)?;

    let extended = cross_chain_proof(
        hub,
        parts.burn_tx.txid(),
        &burn.target_symbol,
        burn.target_cc_id,
        &parts.proof,
    )?;

    codec.marshal_import(&extended, &parts.burn_tx, &parts.payouts)
}
