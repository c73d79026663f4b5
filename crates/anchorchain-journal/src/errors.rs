use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, flags or reserved bytes).
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure.
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds the maximum frame size.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum allowed size.
        max: u32,
    },
    /// A block payload is not valid block JSON.
    #[error("invalid block payload at offset {offset}: {source}")]
    InvalidBlock {
        /// Byte offset of the frame payload.
        offset: u64,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Block serialization failed.
    #[error("block serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The file has data but is too short to hold a header.
    #[error("file is not empty but has no journal header")]
    FileNotEmpty,
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
    /// An earlier append failed and could not be rolled back.
    #[error("journal has an unrepaired partial frame at offset {offset}")]
    TornAppend {
        /// Byte offset where the partial frame starts.
        offset: u64,
    },
}
