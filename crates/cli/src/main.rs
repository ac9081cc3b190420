//! Notabridge diagnostics CLI.
//!
//! Runs the proof-construction core against JSON chain snapshots: derive
//! MoMoM proof roots, build and extend transaction proofs, and check proof
//! branches offline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "notabridge")]
#[command(version, about = "Offline diagnostics for notabridge proof construction")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Derive the MoMoM for a chain's open notarisation interval.
    ProofRoot(cmd::root::ProofRootArgs),
    /// Build an assetchain proof for a transaction in a snapshot.
    Prove(cmd::prove::ProveArgs),
    /// Extend an assetchain proof to the cross-chain root.
    Extend(cmd::prove::ExtendArgs),
    /// Check a proof branch against a leaf and an expected root.
    Verify(cmd::verify::VerifyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_logging(&config, cli.debug);

    match cli.command {
        Command::ProofRoot(args) => cmd::root::run(args, &config)?,
        Command::Prove(args) => cmd::prove::run_prove(args, &config)?,
        Command::Extend(args) => cmd::prove::run_extend(args, &config)?,
        Command::Verify(args) => cmd::verify::run(args)?,
    }

    Ok(())
}

/// Initialize tracing subscriber for logging.
fn init_logging(config: &Config, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = if debug {
        EnvFilter::new("notabridge=debug,notabridge_prover=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()))
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.logging.format == "json" {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
