//! Chain management for the anchorchain ledger.
//!
//! This crate provides:
//! - [`ChainManager`]: genesis, sealing passes, proof and status reads
//! - [`Ledger`]: a shareable handle running every operation in an exclusive
//!   scope keyed by store identity
//! - [`LockRegistry`]: the table of those scopes
//! - [`workflow::anchor_verification`]: the non-fatal entry point used by
//!   code verification
//!
//! ```no_run
//! use anchorchain_chain::{Ledger, LedgerConfig};
//! use anchorchain_store::MemoryStore;
//!
//! let ledger = Ledger::new(MemoryStore::new(), LedgerConfig::default());
//! let status = ledger.status_summary()?;
//! println!("{} activations", status.total_activations);
//! # Ok::<(), anchorchain_chain::ChainError>(())
//! ```

#![deny(missing_docs)]

/// Time sources.
pub mod clock;
/// Ledger configuration.
pub mod config;
/// Error types for chain operations.
pub mod errors;
/// Exclusive scopes keyed by store identity.
pub mod guard;
/// Ledger handle.
pub mod ledger;
/// Chain manager.
pub mod manager;
/// Event proofs.
pub mod proof;
/// Status summaries.
pub mod status;
/// Verification workflow entry point.
pub mod workflow;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{LedgerConfig, DEFAULT_GENESIS_TIMESTAMP};
pub use errors::ChainError;
pub use guard::{LedgerLock, LockRegistry};
pub use ledger::Ledger;
pub use manager::ChainManager;
pub use proof::{EventProof, ProofAnchor};
pub use status::{StatusSummary, NO_ANCHOR_YET, NO_MERKLE_ROOT};
