use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Event canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] anchorchain_canonical::CanonicalizationError),
    /// A canonical value failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] anchorchain_canonical::ValidationError),
    /// Every nonce was tried without meeting the difficulty.
    #[error("nonce space exhausted while mining block {index}")]
    NonceSpaceExhausted {
        /// Index of the block being mined.
        index: u64,
    },
}
