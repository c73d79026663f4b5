use thiserror::Error;

/// Errors surfaced by ledger operations.
#[derive(Error, Debug)]
pub enum ChainError {
    /// The storage collaborator failed; passed through unmodified.
    #[error("storage failure: {0}")]
    Store(#[from] anchorchain_store::StoreError),
    /// Hashing or mining failed.
    #[error("core failure: {0}")]
    Core(#[from] anchorchain_core::CoreError),
    /// Extending the chain would break linkage; nothing was persisted.
    #[error("chain invariant violated at block {index}: {reason}")]
    InvariantViolation {
        /// Index of the block that was refused.
        index: u64,
        /// What did not line up.
        reason: String,
    },
}
