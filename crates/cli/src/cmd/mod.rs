//! CLI subcommands.

pub mod prove;
pub mod root;
pub mod verify;

use anyhow::{Context, Result};
use notabridge_prover::memory::MemoryChain;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Pick the snapshot path: explicit flag first, then the configured default.
pub(crate) fn resolve_snapshot(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    explicit
        .or_else(|| config.snapshot.path.clone())
        .context("no snapshot given: pass --snapshot or set snapshot.path in the config")
}

/// Load a chain snapshot from JSON.
pub(crate) fn load_chain(path: &Path) -> Result<MemoryChain> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let chain: MemoryChain = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
    tracing::debug!(
        symbol = %chain.symbol,
        local_blocks = chain.ledger.blocks.len(),
        hub_blocks = chain.hub.ledger.blocks.len(),
        "loaded snapshot"
    );
    Ok(chain)
}

/// Read a JSON value of any deserializable type from a file.
pub(crate) fn read_json<T: for<'de> serde::Deserialize<'de>>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Print a value as pretty JSON, or write it to `out` when given.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
