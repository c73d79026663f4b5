//! In-memory ledger storage.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use anchorchain_canonical::CalendarDate;
use anchorchain_core::{Block, VerificationEvent};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::traits::{LedgerStore, PendingPool};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Volatile store; every instance is its own ledger.
#[derive(Debug)]
pub struct MemoryStore {
    identity: String,
    blocks: RwLock<BTreeMap<u64, Block>>,
    pending: RwLock<PendingPool>,
}

impl MemoryStore {
    /// Creates an empty store with a fresh identity.
    pub fn new() -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self {
            identity: format!("memory:{instance}"),
            blocks: RwLock::new(BTreeMap::new()),
            pending: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryStore {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    fn latest_block(&self) -> Result<Option<Block>, StoreError> {
        Ok(self.blocks.read().values().next_back().cloned())
    }

    fn all_blocks(&self) -> Result<Vec<Block>, StoreError> {
        Ok(self.blocks.read().values().cloned().collect())
    }

    fn insert_block(&self, block: &Block) -> Result<(), StoreError> {
        let mut blocks = self.blocks.write();
        if blocks.contains_key(&block.index) {
            return Err(StoreError::DuplicateBlockIndex { index: block.index });
        }
        blocks.insert(block.index, block.clone());
        Ok(())
    }

    fn pending_events(&self, date: &CalendarDate) -> Result<Vec<VerificationEvent>, StoreError> {
        Ok(self.pending.read().get(date).cloned().unwrap_or_default())
    }

    fn all_pending(&self) -> Result<PendingPool, StoreError> {
        Ok(self.pending.read().clone())
    }

    fn upsert_pending(
        &self,
        date: &CalendarDate,
        events: &[VerificationEvent],
    ) -> Result<(), StoreError> {
        self.pending.write().insert(date.clone(), events.to_vec());
        Ok(())
    }

    fn delete_pending(&self, date: &CalendarDate) -> Result<(), StoreError> {
        self.pending.write().remove(date);
        Ok(())
    }
}
