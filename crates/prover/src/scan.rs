//! Bounded forward notarisation scan (shared by every proof operation).

use notabridge_core::{Notarisation, SCAN_LIMIT_BLOCKS};

use crate::context::LedgerView;
use crate::error::Result;

/// A notarisation located by a scan, with the height it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    /// Height of the block carrying the notarisation.
    pub height: u32,
    /// The matching notarisation.
    pub notarisation: Notarisation,
}

/// Walk blocks forward from `start_height`, returning the first notarisation
/// accepted by `predicate`.
///
/// The walk visits heights `start_height ..` up to the earlier of
/// `start_height + SCAN_LIMIT_BLOCKS` and the snapshot tip, inspecting each
/// block's notarisations in transaction order. Notarisations land
/// asynchronously on a different cadence than blocks; the bound decouples
/// correctness from that cadence while keeping work finite.
///
/// Returns `Ok(None)` when the window is exhausted without a match.
pub fn scan_notarisations_from<V, P>(
    view: &V,
    start_height: u32,
    mut predicate: P,
) -> Result<Option<ScanMatch>>
where
    V: LedgerView + ?Sized,
    P: FnMut(&Notarisation) -> bool,
{
    let limit = start_height
        .saturating_add(SCAN_LIMIT_BLOCKS)
        .min(view.tip_height());

    for height in start_height..limit {
        let block_hash = view.block_hash(height)?;
        let notarisations = view.notarisations_in_block(&block_hash)?;
        for notarisation in notarisations {
            if predicate(&notarisation) {
                tracing::debug!(height, txid = %notarisation.txid, "scan matched notarisation");
                return Ok(Some(ScanMatch {
                    height,
                    notarisation,
                }));
            }
        }
    }

    Ok(None)
}
