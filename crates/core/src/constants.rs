//! System-wide constants.

/// Upper bound on the number of hub blocks any single notarisation scan may
/// read, in either direction.
///
/// Notarisations land on a different cadence than blocks, so scans have to
/// walk; the bound keeps a pathological chain from causing unbounded work.
pub const SCAN_LIMIT_BLOCKS: u32 = 1440;

/// Smallest cross-chain routing tag for which proof roots may be built.
///
/// `cc_id` values below this are reserved and disable MoMoM construction.
pub const MIN_PROOF_CC_ID: u32 = 2;

/// Maximum length of a chain symbol, in bytes.
pub const MAX_SYMBOL_LEN: usize = 64;
