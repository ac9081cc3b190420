//! Core types for notabridge.

use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_SYMBOL_LEN;
use crate::error::CoreError;
use crate::hashing::sha256d;

/// Short ASCII identifier of a participating chain (e.g. `"KSB"`).
///
/// Validation is enforced during both construction and deserialization so an
/// invalid symbol can never enter a notarisation record: symbols are
/// non-empty, at most [`MAX_SYMBOL_LEN`] bytes, and printable ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainSymbol(String);

impl ChainSymbol {
    /// Create a new symbol, validating the character set and length.
    pub fn new(symbol: impl Into<String>) -> Result<Self, CoreError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(CoreError::InvalidSymbol("empty".to_string()));
        }
        if symbol.len() > MAX_SYMBOL_LEN {
            return Err(CoreError::InvalidSymbol(format!(
                "{} bytes exceeds limit of {}",
                symbol.len(),
                MAX_SYMBOL_LEN
            )));
        }
        if !symbol.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(CoreError::InvalidSymbol(format!(
                "'{}' contains non-printable or non-ASCII characters",
                symbol.escape_debug()
            )));
        }
        Ok(ChainSymbol(symbol))
    }

    /// The symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ChainSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChainSymbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChainSymbol::new(s)
    }
}

impl Serialize for ChainSymbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChainSymbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ChainSymbol::new(value).map_err(serde::de::Error::custom)
    }
}

/// Committed body of a notarisation transaction.
///
/// A notarisation of chain `symbol` commits to the contiguous block range
/// `[height - mom_depth + 1, height]` of that chain via `mom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotarisationPayload {
    /// Chain the notarisation belongs to.
    pub symbol: ChainSymbol,
    /// Merkle-of-Merkles over the committed block range's Merkle roots.
    pub mom: B256,
    /// Number of block Merkle roots committed by `mom`.
    pub mom_depth: u32,
    /// Highest source-chain block height included in `mom`.
    pub height: u32,
    /// Cross-chain routing tag. Values below `MIN_PROOF_CC_ID` are reserved
    /// and disable proof-root construction.
    pub cc_id: u32,
    /// Source-chain notarisation txid, carried for back-notarisation use.
    pub tx_hash: B256,
}

/// A notarisation record: the txid of the transaction carrying it, on
/// whichever ledger it appears, plus the parsed payload.
///
/// On the hub the txid identifies the notarisation transaction itself; for a
/// back-notarisation it identifies the receipt transaction confirmed on the
/// assetchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notarisation {
    /// Txid of the carrying transaction.
    pub txid: B256,
    /// Parsed notarisation body.
    pub payload: NotarisationPayload,
}

/// Notarisations appearing in a single block, in transaction order.
///
/// May be empty; most blocks carry none.
pub type NotarisationsInBlock = Vec<Notarisation>;

/// An opaque marshalled transaction.
///
/// The core never interprets transaction contents; marshalling is owned by
/// external collaborators. The only operation needed here is the txid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction(pub Bytes);

impl RawTransaction {
    /// Create from raw serialized bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        RawTransaction(bytes.into())
    }

    /// The transaction id: double-SHA-256 over the serialized bytes.
    pub fn txid(&self) -> B256 {
        sha256d(&self.0)
    }

    /// The serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// An opaque marshalled transaction output (script and value), owned by the
/// import marshalling collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutput(pub Bytes);

impl RawOutput {
    /// Create from raw serialized bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        RawOutput(bytes.into())
    }
}
