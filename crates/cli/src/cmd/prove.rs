//! The `prove` and `extend` subcommands.

use alloy_primitives::B256;
use anyhow::Result;
use clap::Args;
use notabridge_core::ChainSymbol;
use notabridge_prover::{assetchain_proof, cross_chain_proof, TxProof};
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ProveArgs {
    /// Chain snapshot JSON (defaults to the configured snapshot)
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Txid to prove, 32-byte hex
    #[arg(long)]
    txid: B256,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run_prove(args: ProveArgs, config: &Config) -> Result<()> {
    let path = super::resolve_snapshot(args.snapshot, config)?;
    let chain = super::load_chain(&path)?;

    let proof = assetchain_proof(&chain, args.txid)?;
    super::emit_json(&proof, args.out.as_deref())
}

#[derive(Debug, Args)]
pub struct ExtendArgs {
    /// Chain snapshot JSON (defaults to the configured snapshot)
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Source txid the proof commits to, 32-byte hex
    #[arg(long)]
    txid: B256,
    /// Target chain symbol
    #[arg(long)]
    target: ChainSymbol,
    /// Cross-chain routing tag of the target
    #[arg(long)]
    cc_id: u32,
    /// Path to the assetchain-level proof JSON
    #[arg(long)]
    proof: PathBuf,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run_extend(args: ExtendArgs, config: &Config) -> Result<()> {
    let path = super::resolve_snapshot(args.snapshot, config)?;
    let chain = super::load_chain(&path)?;
    let source_proof: TxProof = super::read_json(&args.proof)?;

    let extended = cross_chain_proof(
        &chain.hub,
        args.txid,
        &args.target,
        args.cc_id,
        &source_proof,
    )?;
    super::emit_json(&extended, args.out.as_deref())
}
