//! The `verify` subcommand: offline branch execution.

use alloy_primitives::B256;
use anyhow::Result;
use clap::Args;
use notabridge_prover::TxProof;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Path to the proof JSON
    #[arg(long)]
    proof: PathBuf,
    /// Leaf the proof is executed on (usually the txid), 32-byte hex
    #[arg(long)]
    leaf: B256,
    /// Expected root; when omitted the computed root is printed instead
    #[arg(long)]
    root: Option<B256>,
}

pub fn run(args: VerifyArgs) -> Result<()> {
    let proof: TxProof = super::read_json(&args.proof)?;
    let computed = proof.branch.exec(args.leaf);

    match args.root {
        Some(expected) => {
            anyhow::ensure!(
                computed == expected,
                "proof mismatch: branch executes to {} but {} was expected",
                hex::encode(computed),
                hex::encode(expected)
            );
            println!("OK");
        }
        None => println!("{}", hex::encode(computed)),
    }

    Ok(())
}
