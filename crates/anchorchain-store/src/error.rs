//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Block journal error.
    #[error("journal error: {0}")]
    Journal(#[from] anchorchain_journal::JournalError),
    /// Pending pool file could not be encoded or decoded.
    #[error("pending pool encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    /// A block with this index is already stored.
    #[error("block index {index} is already taken")]
    DuplicateBlockIndex {
        /// Offending index.
        index: u64,
    },
    /// An append-only backend was handed a block out of sequence.
    #[error("expected block index {expected}, got {found}")]
    OutOfOrderBlock {
        /// Next index the backend can append.
        expected: u64,
        /// Index that was offered.
        found: u64,
    },
    /// Backend-specific failure.
    #[error("{0}")]
    Other(String),
}
