//! Cross-chain proof construction for notabridge.
//!
//! Independent assetchains periodically land *notarisations* on a central hub
//! chain; each commits a contiguous range of source blocks via a
//! Merkle-of-Merkles (MoM). The hub aggregates the MoMs of foreign
//! notarisations into a MoMoM and hands it back to each chain in a
//! *back-notarisation*. This crate assembles the proofs that tie the three
//! levels together:
//!
//! ```text
//! source chain:        TX   bnA0
//!                       \   /
//! hub:         nB0       nA0      nB1      nB2
//!                 \                 \        \
//! target chain:  bnB0              bnB1     bnB2
//! ```
//!
//! A transaction TX on chain A reaches A's MoM inside notarisation nA0; nA0
//! falls between two notarisations of chain B, so B's back-notarisation bnB1
//! carries a MoMoM that covers nA0's MoM. The extended proof therefore
//! verifies TX on chain B without B ever observing A.
//!
//! Provided operations:
//! - [`scan_notarisations_from`]: bounded forward notarisation scan
//! - [`calculate_proof_root`]: MoMoM derivation for a notarisation interval
//! - [`assetchain_proof`]: txid → MoM proof on the source chain
//! - [`cross_chain_proof`]: MoM proof → MoMoM proof on the hub
//! - [`complete_import`]: proof extension for an import transaction
//! - [`next_back_notarisation`]: successor lookup on the assetchain
//!
//! All operations are synchronous, deterministic over a fixed snapshot, and
//! read at most [`notabridge_core::SCAN_LIMIT_BLOCKS`] hub blocks. Chain
//! state is reached exclusively through the capability traits in
//! [`context`], never through ambient globals.

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod import;
pub mod memory;
pub mod proof;
mod proof_root;
mod scan;

mod assetchain;
mod crosschain;

pub use assetchain::{assetchain_proof, next_back_notarisation};
pub use context::{AssetchainContext, BlockIndex, HubContext, LedgerView};
pub use crosschain::cross_chain_proof;
pub use error::{ProofError, Result};
pub use import::complete_import;
pub use proof::TxProof;
pub use proof_root::{calculate_proof_root, ProofRoot};
pub use scan::{scan_notarisations_from, ScanMatch};
