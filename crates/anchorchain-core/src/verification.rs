use anchorchain_canonical::{CalendarDate, Digest};
use serde::Serialize;
use thiserror::Error;

use crate::errors::CoreError;
use crate::events::Block;
use crate::hasher::merkle_root;
use crate::miner::Difficulty;

/// A single broken chain invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainViolation {
    /// The block at this position carries the wrong index.
    #[error("block at position {position} has index {index}")]
    IndexGap {
        /// Position in the chain.
        position: usize,
        /// Stored index.
        index: u64,
    },
    /// Genesis does not link to the zero digest.
    #[error("genesis previous hash is {found}, expected the zero digest")]
    GenesisPreviousHash {
        /// Stored previous hash.
        found: Digest,
    },
    /// Genesis carries events.
    #[error("genesis carries {count} event(s)")]
    GenesisHasEvents {
        /// Number of events found.
        count: usize,
    },
    /// A non-genesis block seals no events.
    #[error("block {index} seals no events")]
    EmptyBlock {
        /// Block index.
        index: u64,
    },
    /// `previous_hash` does not match the predecessor's hash.
    #[error("block {index} previous hash {found} does not match {expected}")]
    BrokenLink {
        /// Block index.
        index: u64,
        /// Predecessor hash.
        expected: Digest,
        /// Stored previous hash.
        found: Digest,
    },
    /// Stored hash differs from the recomputed header hash.
    #[error("block {index} hash does not match its header")]
    HashMismatch {
        /// Block index.
        index: u64,
    },
    /// Stored hash does not meet the difficulty target.
    #[error("block {index} hash has fewer than {difficulty} leading zeros")]
    InsufficientWork {
        /// Block index.
        index: u64,
        /// Required leading zeros.
        difficulty: usize,
    },
    /// Stored Merkle root differs from the root over the block's events.
    #[error("block {index} merkle root does not match its events")]
    MerkleMismatch {
        /// Block index.
        index: u64,
    },
    /// An event's date is not the block's date bucket.
    #[error("block {index} for {date} contains an event for {event_date}")]
    DateBucketMismatch {
        /// Block index.
        index: u64,
        /// Block date.
        date: CalendarDate,
        /// Offending event date.
        event_date: CalendarDate,
    },
}

/// Outcome of auditing a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    /// Number of blocks inspected.
    pub blocks_checked: usize,
    /// Every violation found, in chain order.
    pub violations: Vec<ChainViolation>,
}

impl ChainReport {
    /// True when no invariant is broken.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Audits an index-ascending chain against the ledger invariants.
///
/// The audit does not stop at the first problem; every violation is
/// collected so that operators see the full extent of the damage.
pub fn verify_chain(blocks: &[Block], difficulty: Difficulty) -> Result<ChainReport, CoreError> {
    let mut violations = Vec::new();

    for (position, block) in blocks.iter().enumerate() {
        if block.index != position as u64 {
            violations.push(ChainViolation::IndexGap {
                position,
                index: block.index,
            });
        }

        match position.checked_sub(1).map(|prev| &blocks[prev]) {
            None => {
                if block.previous_hash != Digest::zero() {
                    violations.push(ChainViolation::GenesisPreviousHash {
                        found: block.previous_hash.clone(),
                    });
                }
                if !block.events.is_empty() {
                    violations.push(ChainViolation::GenesisHasEvents {
                        count: block.events.len(),
                    });
                }
            }
            Some(previous) => {
                if block.previous_hash != previous.hash {
                    violations.push(ChainViolation::BrokenLink {
                        index: block.index,
                        expected: previous.hash.clone(),
                        found: block.previous_hash.clone(),
                    });
                }
                if block.events.is_empty() {
                    violations.push(ChainViolation::EmptyBlock { index: block.index });
                }
            }
        }

        if block.recompute_hash() != block.hash {
            violations.push(ChainViolation::HashMismatch { index: block.index });
        }
        if !difficulty.is_satisfied_by(&block.hash) {
            violations.push(ChainViolation::InsufficientWork {
                index: block.index,
                difficulty: difficulty.zeros(),
            });
        }
        if merkle_root(&block.events)? != block.merkle_root {
            violations.push(ChainViolation::MerkleMismatch { index: block.index });
        }
        if let Some(stray) = block.events.iter().find(|e| e.date() != block.date) {
            violations.push(ChainViolation::DateBucketMismatch {
                index: block.index,
                date: block.date.clone(),
                event_date: stray.date(),
            });
        }
    }

    Ok(ChainReport {
        blocks_checked: blocks.len(),
        violations,
    })
}
