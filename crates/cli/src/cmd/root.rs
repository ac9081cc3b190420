//! The `proof-root` subcommand: diagnostic exposure of MoMoM derivation.

use anyhow::Result;
use clap::Args;
use notabridge_core::ChainSymbol;
use notabridge_prover::calculate_proof_root;
use serde_json::json;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ProofRootArgs {
    /// Chain snapshot JSON (defaults to the configured snapshot)
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Chain symbol whose notarisation interval to derive
    #[arg(long)]
    symbol: ChainSymbol,
    /// Cross-chain routing tag
    #[arg(long)]
    cc_id: u32,
    /// Hub reference height to scan back from
    #[arg(long)]
    height: u32,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: ProofRootArgs, config: &Config) -> Result<()> {
    let path = super::resolve_snapshot(args.snapshot, config)?;
    let chain = super::load_chain(&path)?;

    let roots = calculate_proof_root(&chain.hub, &args.symbol, args.cc_id, args.height)?;

    let report = json!({
        "momom": roots.momom,
        "moms": roots.moms,
        "destNotarisationTxid": roots.dest_notarisation_txid,
    });
    super::emit_json(&report, args.out.as_deref())
}
