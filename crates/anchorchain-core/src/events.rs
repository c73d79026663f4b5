use anchorchain_canonical::{CalendarDate, Digest, HeaderFields, Timestamp};
use serde::{Deserialize, Serialize};

/// Outcome of a successful code verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// The code was verified for the first time.
    #[serde(rename = "TERVERIFIKASI")]
    FirstVerification,
    /// The code had already been verified before.
    #[serde(rename = "PERNAH_TERVERIFIKASI")]
    PreviouslyVerified,
}

impl VerificationStatus {
    /// Wire tag of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::FirstVerification => "TERVERIFIKASI",
            VerificationStatus::PreviouslyVerified => "PERNAH_TERVERIFIKASI",
        }
    }
}

/// One verification occurrence, recorded into the ledger.
///
/// Serialized with camelCase keys. The event digest is taken over the
/// compact JSON in field declaration order, so the order below is part of
/// the hash and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationEvent {
    /// Product (batch) identifier.
    pub product_id: String,
    /// Product display name.
    pub product_name: String,
    /// Distributor the batch was issued to.
    pub distributor: String,
    /// Identifier of the verified code.
    pub code_id: String,
    /// Anchor hash bound to the code and the server secret.
    pub anchor_hash: Digest,
    /// Verification outcome.
    pub status: VerificationStatus,
    /// When the verification happened.
    pub timestamp: Timestamp,
}

impl VerificationEvent {
    /// Pending pool bucket of the event.
    pub fn date(&self) -> CalendarDate {
        self.timestamp.date()
    }
}

/// A block before mining: every header field except `nonce` and `hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDraft {
    /// Block height (0 = genesis).
    pub index: u64,
    /// Block creation time.
    pub timestamp: Timestamp,
    /// Hash of the preceding block (zero digest for genesis).
    pub previous_hash: Digest,
    /// Merkle root over `events`.
    pub merkle_root: Digest,
    /// Pending pool date the block seals.
    pub date: CalendarDate,
    /// Sealed events, in pool order.
    pub events: Vec<VerificationEvent>,
}

impl BlockDraft {
    /// Header fields in hashing order.
    pub fn header_fields(&self) -> HeaderFields<'_> {
        HeaderFields {
            index: self.index,
            previous_hash: &self.previous_hash,
            timestamp: &self.timestamp,
            merkle_root: &self.merkle_root,
            date: &self.date,
        }
    }
}

/// A sealed, mined page of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block height (0 = genesis).
    pub index: u64,
    /// Block creation time.
    pub timestamp: Timestamp,
    /// Hash of the preceding block (zero digest for genesis).
    pub previous_hash: Digest,
    /// Merkle root over `events`.
    pub merkle_root: Digest,
    /// Proof-of-work nonce.
    pub nonce: u64,
    /// Header hash; meets the difficulty target.
    pub hash: Digest,
    /// Pending pool date the block seals.
    pub date: CalendarDate,
    /// Sealed events, in pool order.
    pub events: Vec<VerificationEvent>,
}

impl Block {
    /// Assembles a block from a draft and its proof of work.
    pub fn from_draft(draft: BlockDraft, nonce: u64, hash: Digest) -> Self {
        Self {
            index: draft.index,
            timestamp: draft.timestamp,
            previous_hash: draft.previous_hash,
            merkle_root: draft.merkle_root,
            nonce,
            hash,
            date: draft.date,
            events: draft.events,
        }
    }

    /// Header fields in hashing order (nonce excluded).
    pub fn header_fields(&self) -> HeaderFields<'_> {
        HeaderFields {
            index: self.index,
            previous_hash: &self.previous_hash,
            timestamp: &self.timestamp,
            merkle_root: &self.merkle_root,
            date: &self.date,
        }
    }

    /// Recomputes the header hash from the stored fields.
    pub fn recompute_hash(&self) -> Digest {
        anchorchain_canonical::block_header_hash(&self.header_fields(), self.nonce)
    }

    /// True for the index-0 block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
