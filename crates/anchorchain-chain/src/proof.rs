use anchorchain_canonical::{CalendarDate, Digest, Timestamp};
use anchorchain_core::{Block, VerificationEvent, VerificationStatus};
use anchorchain_store::PendingMatch;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Evidence that a verification event is held by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventProof {
    /// Anchor hash carried by the event.
    pub anchor_hash: Digest,
    /// Date bucket the event belongs to.
    pub anchor_date: CalendarDate,
    /// Verification outcome recorded with the event.
    pub status: VerificationStatus,
    /// Where the event currently lives.
    #[serde(flatten)]
    pub anchor: ProofAnchor,
}

/// Location of a proven event.
///
/// Serialized flat into [`EventProof`] with a boolean `anchored` field; the
/// block fields appear only for sealed events and `pendingCount` only for
/// pending ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofAnchor {
    /// Sealed into a mined block.
    Sealed {
        /// Hash of the sealing block.
        block_hash: Digest,
        /// Index of the sealing block.
        block_index: u64,
        /// Creation time of the sealing block.
        block_timestamp: Timestamp,
        /// Merkle root of the sealing block.
        merkle_root: Digest,
    },
    /// Still waiting in the pending pool.
    Pending {
        /// Events pending for the same date, this one included.
        pending_count: usize,
    },
}

impl Serialize for ProofAnchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProofAnchor::Sealed {
                block_hash,
                block_index,
                block_timestamp,
                merkle_root,
            } => {
                let mut state = serializer.serialize_struct("ProofAnchor", 5)?;
                state.serialize_field("anchored", &true)?;
                state.serialize_field("blockHash", block_hash)?;
                state.serialize_field("blockIndex", block_index)?;
                state.serialize_field("blockTimestamp", block_timestamp)?;
                state.serialize_field("merkleRoot", merkle_root)?;
                state.end()
            }
            ProofAnchor::Pending { pending_count } => {
                let mut state = serializer.serialize_struct("ProofAnchor", 2)?;
                state.serialize_field("anchored", &false)?;
                state.serialize_field("pendingCount", pending_count)?;
                state.end()
            }
        }
    }
}

impl EventProof {
    pub(crate) fn sealed(event: &VerificationEvent, block: &Block) -> Self {
        Self {
            anchor_hash: event.anchor_hash.clone(),
            anchor_date: block.date.clone(),
            status: event.status,
            anchor: ProofAnchor::Sealed {
                block_hash: block.hash.clone(),
                block_index: block.index,
                block_timestamp: block.timestamp.clone(),
                merkle_root: block.merkle_root.clone(),
            },
        }
    }

    pub(crate) fn pending(found: PendingMatch) -> Self {
        Self {
            anchor_hash: found.event.anchor_hash,
            anchor_date: found.date,
            status: found.event.status,
            anchor: ProofAnchor::Pending {
                pending_count: found.pending_count,
            },
        }
    }

    /// True once the event is part of a mined block.
    pub fn is_anchored(&self) -> bool {
        matches!(self.anchor, ProofAnchor::Sealed { .. })
    }

    /// The sealing block's index, if anchored.
    pub fn block_index(&self) -> Option<u64> {
        match &self.anchor {
            ProofAnchor::Sealed { block_index, .. } => Some(*block_index),
            ProofAnchor::Pending { .. } => None,
        }
    }
}
