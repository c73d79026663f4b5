//! Canonical hashing primitives for the anchorchain ledger.
//!
//! Everything that participates in a block hash or a Merkle root is defined
//! here: the hex digest type, the validated timestamp and calendar-date
//! newtypes, the canonical byte encoding of records, the pairwise Merkle
//! reduction and the pipe-delimited block header hash.
//!
#![deny(missing_docs)]

/// Anchor hash derivation for registered codes.
pub mod anchor;
/// Canonical (declaration-order, compact JSON) serialization of hashed records.
pub mod canonicalizer;
/// Hex-encoded SHA-256 digests.
pub mod digest;
/// Merkle reduction and block header hashing.
pub mod hashing;
/// Validated timestamp and date newtypes.
pub mod identifiers;
/// Validation errors shared by canonical types.
pub mod validation;

pub use anchor::anchor_hash;
pub use canonicalizer::{canonical_bytes, CanonicalizationError};
pub use digest::{sha256_hex, Digest};
pub use hashing::{block_header_hash, genesis_merkle_root, merkle_root_of_leaves, HeaderFields};
pub use identifiers::{CalendarDate, Timestamp};
pub use validation::ValidationError;
