//! Opening the ledger a command operates on.

use std::path::PathBuf;

use anchorchain_chain::{Ledger, LedgerConfig};
use anchorchain_core::Difficulty;
use anchorchain_store::{FileStore, FileStoreOptions};
use tracing::debug;

/// Ledger location and settings shared by every command.
pub struct LedgerArgs {
    pub data_dir: PathBuf,
    pub difficulty: Difficulty,
    pub sync: bool,
}

/// Opens the file-backed ledger described by `args`.
pub fn open_ledger(args: &LedgerArgs) -> Result<Ledger<FileStore>, Box<dyn std::error::Error>> {
    debug!(data_dir = %args.data_dir.display(), difficulty = %args.difficulty, "opening ledger");
    let store = FileStore::open(&args.data_dir, FileStoreOptions { sync: args.sync })
        .map_err(|e| format!("Failed to open ledger at {}: {}", args.data_dir.display(), e))?;
    Ok(Ledger::new(store, LedgerConfig::with_difficulty(args.difficulty)))
}
