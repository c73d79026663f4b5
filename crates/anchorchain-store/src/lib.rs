//! Storage contract and backends for the anchorchain ledger.
//!
//! This crate provides:
//! - The [`LedgerStore`] trait: blocks by index, pending events by date
//! - [`MemoryStore`], a volatile backend for tests and embedding
//! - [`FileStore`], a durable backend built on the block journal
//! - Event filters and read helpers used by proof lookups

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Durable directory-backed store.
pub mod file;
/// Event filtering API.
pub mod filter;
/// Volatile in-memory store.
pub mod memory;
/// Storage contract.
pub mod traits;
/// Read helpers over block and pending snapshots.
pub mod view;

pub use error::StoreError;
pub use file::{FileStore, FileStoreOptions};
pub use filter::{
    AndFilter, CodeIdFilter, DateRangeFilter, EventFilter, StatusFilter, TimestampFilter,
};
pub use memory::MemoryStore;
pub use traits::{LedgerStore, PendingPool};
pub use view::{latest_pending_match, latest_sealed_match, sealed_event_count, PendingMatch};
