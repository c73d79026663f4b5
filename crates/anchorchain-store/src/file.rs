//! Directory-backed ledger storage.
//!
//! Layout:
//! - `blocks.acj`: append-only block journal (see `anchorchain-journal`)
//! - `pending.json`: the whole pending pool, rewritten atomically

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anchorchain_canonical::CalendarDate;
use anchorchain_core::{Block, VerificationEvent};
use anchorchain_journal::{repair_tail, JournalReader, JournalWriter, ReadMode, WriteOptions};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::traits::{LedgerStore, PendingPool};

/// File name of the block journal inside the store directory.
pub const BLOCKS_FILE: &str = "blocks.acj";
/// File name of the pending pool snapshot inside the store directory.
pub const PENDING_FILE: &str = "pending.json";

/// Options for opening a [`FileStore`].
#[derive(Debug, Clone, Default)]
pub struct FileStoreOptions {
    /// fsync after every block append and pending rewrite.
    pub sync: bool,
}

struct FileState {
    blocks: Vec<Block>,
    pending: PendingPool,
    journal: JournalWriter,
}

/// Durable store in a directory.
///
/// Blocks are cached in memory after replay; every write reaches disk
/// before the cache is updated, so a failed write leaves the visible state
/// untouched. Open a directory once per process and share the handle
/// (`Arc<FileStore>`); separately opened handles keep separate caches.
pub struct FileStore {
    dir: PathBuf,
    identity: String,
    sync: bool,
    state: RwLock<FileState>,
}

impl FileStore {
    /// Opens (or initializes) a store directory.
    ///
    /// A torn journal tail from an interrupted append is cut off before the
    /// blocks are replayed.
    pub fn open(dir: impl AsRef<Path>, options: FileStoreOptions) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let dir = fs::canonicalize(dir)?;
        let blocks_path = dir.join(BLOCKS_FILE);

        if blocks_path.exists() && fs::metadata(&blocks_path)?.len() > 0 {
            let dropped = repair_tail(&blocks_path)?;
            if dropped > 0 {
                warn!(path = %blocks_path.display(), bytes = dropped, "discarded torn journal tail");
            }
        }

        let journal = JournalWriter::open(
            &blocks_path,
            WriteOptions {
                sync: options.sync,
                create: true,
            },
        )?;
        let blocks = JournalReader::open(&blocks_path, ReadMode::Strict)?.read_all()?;
        let pending = read_pending(&dir.join(PENDING_FILE))?;

        info!(
            path = %dir.display(),
            blocks = blocks.len(),
            pending_dates = pending.len(),
            "opened ledger store"
        );

        Ok(Self {
            identity: format!("file:{}", dir.display()),
            dir,
            sync: options.sync,
            state: RwLock::new(FileState {
                blocks,
                pending,
                journal,
            }),
        })
    }

    /// Directory holding the store files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_pending(&self, pending: &PendingPool) -> Result<(), StoreError> {
        let target = self.dir.join(PENDING_FILE);
        let temp = self
            .dir
            .join(format!("{PENDING_FILE}.{}.tmp", std::process::id()));
        let bytes = serde_json::to_vec_pretty(pending)?;

        let mut file = fs::File::create(&temp)?;
        file.write_all(&bytes)?;
        if self.sync {
            file.sync_all()?;
        }
        drop(file);
        fs::rename(&temp, &target)?;
        debug!(dates = pending.len(), "rewrote pending pool");
        Ok(())
    }
}

fn read_pending(path: &Path) -> Result<PendingPool, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PendingPool::new()),
        Err(e) => Err(e.into()),
    }
}

impl LedgerStore for FileStore {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    fn latest_block(&self) -> Result<Option<Block>, StoreError> {
        Ok(self.state.read().blocks.last().cloned())
    }

    fn all_blocks(&self) -> Result<Vec<Block>, StoreError> {
        Ok(self.state.read().blocks.clone())
    }

    fn insert_block(&self, block: &Block) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if state.blocks.iter().any(|b| b.index == block.index) {
            return Err(StoreError::DuplicateBlockIndex { index: block.index });
        }
        let expected = state.blocks.len() as u64;
        if block.index != expected {
            return Err(StoreError::OutOfOrderBlock {
                expected,
                found: block.index,
            });
        }
        state.journal.append_block(block)?;
        state.blocks.push(block.clone());
        Ok(())
    }

    fn pending_events(&self, date: &CalendarDate) -> Result<Vec<VerificationEvent>, StoreError> {
        Ok(self
            .state
            .read()
            .pending
            .get(date)
            .cloned()
            .unwrap_or_default())
    }

    fn all_pending(&self) -> Result<PendingPool, StoreError> {
        Ok(self.state.read().pending.clone())
    }

    fn upsert_pending(
        &self,
        date: &CalendarDate,
        events: &[VerificationEvent],
    ) -> Result<(), StoreError> {
        let mut state = self.state.write();
        let mut next = state.pending.clone();
        next.insert(date.clone(), events.to_vec());
        self.write_pending(&next)?;
        state.pending = next;
        Ok(())
    }

    fn delete_pending(&self, date: &CalendarDate) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if !state.pending.contains_key(date) {
            return Ok(());
        }
        let mut next = state.pending.clone();
        next.remove(date);
        self.write_pending(&next)?;
        state.pending = next;
        Ok(())
    }
}
