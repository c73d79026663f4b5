//! Append-only journal for sealed anchorchain blocks.
//!
//! This crate provides:
//! - A framed, append-only file format for block JSON
//! - Reader/writer APIs with strict and permissive truncation handling
//! - Tail repair after an interrupted append
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anchorchain_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
//! # fn demo(block: anchorchain_core::Block) -> Result<(), anchorchain_journal::JournalError> {
//! let mut writer = JournalWriter::open("blocks.acj", WriteOptions::default())?;
//! writer.append_block(&block)?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open("blocks.acj", ReadMode::Strict)?;
//! while let Some(block) = reader.read_block()? {
//!     println!("block {} sealed {}", block.index, block.date);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// Error types for journal operations.
pub mod errors;
/// Header and frame layout.
pub mod frame;
/// Journal reader implementation.
pub mod reader;
/// Journal writer implementation.
pub mod writer;

pub use errors::JournalError;
pub use frame::{FrameHeader, FrameKind, JournalHeader};
pub use reader::{repair_tail, JournalReader, ReadMode};
pub use writer::{JournalSink, JournalWriter, WriteOptions};
