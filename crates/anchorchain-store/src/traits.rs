//! The storage contract the chain manager relies on.

use std::collections::BTreeMap;
use std::sync::Arc;

use anchorchain_canonical::CalendarDate;
use anchorchain_core::{Block, VerificationEvent};

use crate::error::StoreError;
use crate::filter::{CodeIdFilter, EventFilter};
use crate::view;

/// Pending pool: date bucket to not-yet-sealed events, in append order.
pub type PendingPool = BTreeMap<CalendarDate, Vec<VerificationEvent>>;

/// Durable key-value access to blocks and pending pools.
///
/// Implementations provide last-write-wins per key and read-your-writes.
/// All mutations are issued from inside the ledger's exclusive scope, so
/// backends need not coordinate concurrent writers themselves.
pub trait LedgerStore: Send + Sync {
    /// Stable identity of the underlying storage; handles over the same
    /// storage must report the same value.
    fn identity(&self) -> String;

    /// The block with the highest index, if any.
    fn latest_block(&self) -> Result<Option<Block>, StoreError>;

    /// Every block, index ascending.
    fn all_blocks(&self) -> Result<Vec<Block>, StoreError>;

    /// Persists a block. Reusing an index is a programming error and must be
    /// refused with [`StoreError::DuplicateBlockIndex`].
    fn insert_block(&self, block: &Block) -> Result<(), StoreError>;

    /// Events pending for `date`; empty when the date is unknown.
    fn pending_events(&self, date: &CalendarDate) -> Result<Vec<VerificationEvent>, StoreError>;

    /// The whole pending pool.
    fn all_pending(&self) -> Result<PendingPool, StoreError>;

    /// Replaces the events pending for `date` wholesale.
    fn upsert_pending(
        &self,
        date: &CalendarDate,
        events: &[VerificationEvent],
    ) -> Result<(), StoreError>;

    /// Drops the pending entry for `date`.
    fn delete_pending(&self, date: &CalendarDate) -> Result<(), StoreError>;

    /// Newest sealed event matching `filter`, with its block.
    fn find_event_matching(
        &self,
        filter: &dyn EventFilter,
    ) -> Result<Option<(VerificationEvent, Block)>, StoreError> {
        Ok(view::latest_sealed_match(&self.all_blocks()?, filter))
    }

    /// Newest sealed event for a code, with its block.
    fn find_event_by_code_id(
        &self,
        code_id: &str,
    ) -> Result<Option<(VerificationEvent, Block)>, StoreError> {
        self.find_event_matching(&CodeIdFilter::new(code_id))
    }

    /// Number of events across all non-genesis blocks.
    fn total_sealed_events(&self) -> Result<usize, StoreError> {
        Ok(view::sealed_event_count(&self.all_blocks()?))
    }
}

impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    fn identity(&self) -> String {
        (**self).identity()
    }

    fn latest_block(&self) -> Result<Option<Block>, StoreError> {
        (**self).latest_block()
    }

    fn all_blocks(&self) -> Result<Vec<Block>, StoreError> {
        (**self).all_blocks()
    }

    fn insert_block(&self, block: &Block) -> Result<(), StoreError> {
        (**self).insert_block(block)
    }

    fn pending_events(&self, date: &CalendarDate) -> Result<Vec<VerificationEvent>, StoreError> {
        (**self).pending_events(date)
    }

    fn all_pending(&self) -> Result<PendingPool, StoreError> {
        (**self).all_pending()
    }

    fn upsert_pending(
        &self,
        date: &CalendarDate,
        events: &[VerificationEvent],
    ) -> Result<(), StoreError> {
        (**self).upsert_pending(date, events)
    }

    fn delete_pending(&self, date: &CalendarDate) -> Result<(), StoreError> {
        (**self).delete_pending(date)
    }

    fn find_event_matching(
        &self,
        filter: &dyn EventFilter,
    ) -> Result<Option<(VerificationEvent, Block)>, StoreError> {
        (**self).find_event_matching(filter)
    }

    fn find_event_by_code_id(
        &self,
        code_id: &str,
    ) -> Result<Option<(VerificationEvent, Block)>, StoreError> {
        (**self).find_event_by_code_id(code_id)
    }

    fn total_sealed_events(&self) -> Result<usize, StoreError> {
        (**self).total_sealed_events()
    }
}
