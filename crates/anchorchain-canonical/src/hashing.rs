use sha2::{Digest as Sha2Digest, Sha256};

use crate::digest::{sha256_hex, Digest};
use crate::identifiers::{CalendarDate, Timestamp};

/// Literal hashed to form the Merkle root of an empty event set.
pub const GENESIS_MERKLE_SEED: &str = "GENESIS";

/// Merkle root of an empty event set: `sha256("GENESIS")`.
pub fn genesis_merkle_root() -> Digest {
    sha256_hex(GENESIS_MERKLE_SEED)
}

/// Reduces leaf digests to a single Merkle root.
///
/// Adjacent digests are paired left to right and the parent is
/// `sha256(left_hex || right_hex)`. A trailing unpaired digest is paired
/// with itself. An empty leaf set yields [`genesis_merkle_root`].
pub fn merkle_root_of_leaves(mut level: Vec<Digest>) -> Digest {
    if level.is_empty() {
        return genesis_merkle_root();
    }

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                let mut hasher = Sha256::new();
                hasher.update(left.as_str());
                hasher.update(right.as_str());
                Digest::from_hasher(hasher)
            })
            .collect();
    }

    level.swap_remove(0)
}

/// Block header fields other than the nonce, in hashing order.
#[derive(Debug, Clone, Copy)]
pub struct HeaderFields<'a> {
    /// Block height.
    pub index: u64,
    /// Hash of the preceding block.
    pub previous_hash: &'a Digest,
    /// Block creation time.
    pub timestamp: &'a Timestamp,
    /// Merkle root over the block's events.
    pub merkle_root: &'a Digest,
    /// Pending pool date sealed by the block.
    pub date: &'a CalendarDate,
}

/// Hashes a block header: `sha256("index|previousHash|timestamp|merkleRoot|nonce|date")`.
pub fn block_header_hash(fields: &HeaderFields<'_>, nonce: u64) -> Digest {
    PreparedHeader::new(fields).hash_with_nonce(nonce)
}

/// Header hasher with the nonce-independent prefix already absorbed.
///
/// Mining calls [`PreparedHeader::hash_with_nonce`] once per candidate, so
/// the prefix state is cloned instead of rehashing the same bytes.
#[derive(Clone)]
pub struct PreparedHeader {
    prefix: Sha256,
    suffix: String,
}

impl PreparedHeader {
    /// Absorbs `index|previousHash|timestamp|merkleRoot|`.
    pub fn new(fields: &HeaderFields<'_>) -> Self {
        let mut prefix = Sha256::new();
        prefix.update(format!(
            "{}|{}|{}|{}|",
            fields.index, fields.previous_hash, fields.timestamp, fields.merkle_root
        ));
        Self {
            prefix,
            suffix: format!("|{}", fields.date),
        }
    }

    /// Completes the header hash for one nonce candidate.
    pub fn hash_with_nonce(&self, nonce: u64) -> Digest {
        let mut hasher = self.prefix.clone();
        hasher.update(nonce.to_string());
        hasher.update(&self.suffix);
        Digest::from_hasher(hasher)
    }
}
