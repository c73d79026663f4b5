use std::fmt;

use anchorchain_canonical::hashing::PreparedHeader;
use anchorchain_canonical::{Digest, HeaderFields, ValidationError};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::events::{Block, BlockDraft};

/// Largest meaningful difficulty: a SHA-256 hex digest has 64 characters.
pub const MAX_DIFFICULTY: usize = 64;

/// Number of leading `'0'` hex characters a block hash must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Difficulty(usize);

impl Difficulty {
    /// Validates a difficulty (`0..=64`).
    pub fn new(zeros: usize) -> Result<Self, ValidationError> {
        if zeros > MAX_DIFFICULTY {
            return Err(ValidationError::OutOfBounds {
                field: "difficulty",
                value: zeros.to_string(),
            });
        }
        Ok(Self(zeros))
    }

    /// Required count of leading zeros.
    pub fn zeros(self) -> usize {
        self.0
    }

    /// Whether `hash` meets this target.
    pub fn is_satisfied_by(self, hash: &Digest) -> bool {
        hash.leading_zeros() >= self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<usize> for Difficulty {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for usize {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a successful nonce search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedHeader {
    /// First nonce (counting up from 0) meeting the difficulty.
    pub nonce: u64,
    /// Header hash at that nonce.
    pub hash: Digest,
}

/// Proof-of-work miner.
///
/// The search is synchronous and deterministic: identical header fields and
/// difficulty always yield the same nonce.
#[derive(Debug, Clone, Copy, Default)]
pub struct Miner {
    difficulty: Difficulty,
}

impl Miner {
    /// Creates a miner for a fixed difficulty.
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Difficulty this miner targets.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Searches nonces from 0 upward until the header hash meets the target.
    pub fn mine(&self, fields: &HeaderFields<'_>) -> Result<MinedHeader, CoreError> {
        let prepared = PreparedHeader::new(fields);
        (0..=u64::MAX)
            .map(|nonce| (nonce, prepared.hash_with_nonce(nonce)))
            .find(|(_, hash)| self.difficulty.is_satisfied_by(hash))
            .map(|(nonce, hash)| MinedHeader { nonce, hash })
            .ok_or(CoreError::NonceSpaceExhausted {
                index: fields.index,
            })
    }

    /// Mines a draft into a sealed block.
    pub fn seal(&self, draft: BlockDraft) -> Result<Block, CoreError> {
        let mined = self.mine(&draft.header_fields())?;
        Ok(Block::from_draft(draft, mined.nonce, mined.hash))
    }
}
