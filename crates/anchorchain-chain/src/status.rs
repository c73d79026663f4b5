use anchorchain_core::Difficulty;
use serde::Serialize;

/// Reported as the last anchor date before any block has been sealed.
pub const NO_ANCHOR_YET: &str = "none yet";
/// Reported as the latest Merkle root before any block has been sealed.
pub const NO_MERKLE_ROOT: &str = "-";

/// Snapshot of ledger progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    /// Date of the newest sealed block, or [`NO_ANCHOR_YET`].
    pub last_anchor_date: String,
    /// Events across all non-genesis blocks.
    pub total_activations: usize,
    /// Merkle root of the newest sealed block, or [`NO_MERKLE_ROOT`].
    pub latest_merkle_root: String,
    /// Events waiting in today's pending pool.
    pub pending_today: usize,
    /// Index of the chain head.
    pub height: u64,
    /// Difficulty the ledger mines at.
    pub difficulty: Difficulty,
}
