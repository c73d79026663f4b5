use anchorchain_canonical::Timestamp;
use anchorchain_core::Difficulty;
use serde::{Deserialize, Serialize};

/// Creation time of the genesis block unless configured otherwise.
pub const DEFAULT_GENESIS_TIMESTAMP: &str = "2024-01-01T00:00:00.000Z";

/// Ledger-wide settings fixed for the lifetime of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Leading zero hex digits required of every block hash.
    pub difficulty: Difficulty,
    /// Timestamp written into the genesis block.
    pub genesis_timestamp: Timestamp,
}

impl LedgerConfig {
    /// Default configuration with a different difficulty.
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            genesis_timestamp: Timestamp::parse(DEFAULT_GENESIS_TIMESTAMP)
                .expect("default genesis timestamp is valid"),
        }
    }
}
