//! Core ledger types and algorithms for anchorchain.
//!
//! This crate provides:
//! - The verification event and block records stored in the ledger
//! - Event digests and the Merkle root over a block's events
//! - The proof-of-work miner that seals block headers
//! - An offline audit of a whole chain
//!
//! Core invariants:
//! - Events are immutable once recorded
//! - `block[i].previous_hash == block[i - 1].hash` and genesis links to the zero digest
//! - A block's `hash` is its recomputed header hash and meets the difficulty
//! - Only genesis carries an empty event set
//!
#![deny(missing_docs)]

/// Error types for core operations.
pub mod errors;
/// Event and block records.
pub mod events;
/// Event digests and Merkle roots over events.
pub mod hasher;
/// Proof-of-work difficulty and nonce search.
pub mod miner;
/// Whole-chain audit.
pub mod verification;

pub use errors::CoreError;
pub use events::{Block, BlockDraft, VerificationEvent, VerificationStatus};
pub use hasher::{event_digest, merkle_root};
pub use miner::{Difficulty, MinedHeader, Miner};
pub use verification::{verify_chain, ChainReport, ChainViolation};
