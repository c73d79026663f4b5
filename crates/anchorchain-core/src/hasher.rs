use anchorchain_canonical::{canonical_bytes, merkle_root_of_leaves, sha256_hex, Digest};

use crate::errors::CoreError;
use crate::events::VerificationEvent;

/// SHA-256 of the event's canonical JSON bytes.
pub fn event_digest(event: &VerificationEvent) -> Result<Digest, CoreError> {
    Ok(sha256_hex(canonical_bytes(event)?))
}

/// Merkle root over an ordered event set.
///
/// Leaves are [`event_digest`]s in sequence order; an empty set yields
/// `sha256("GENESIS")`.
pub fn merkle_root(events: &[VerificationEvent]) -> Result<Digest, CoreError> {
    let leaves = events
        .iter()
        .map(event_digest)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merkle_root_of_leaves(leaves))
}
