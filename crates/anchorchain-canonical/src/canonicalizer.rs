use serde::Serialize;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The record could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Produces the canonical bytes of a record.
///
/// Records are emitted as compact JSON with struct fields in declaration
/// order, so a hashed record type fixes its canonical key order by the
/// order its fields are declared in.
pub fn canonical_bytes<T: Serialize>(record: &T) -> Result<Vec<u8>, CanonicalizationError> {
    Ok(serde_json::to_vec(record)?)
}
