//! Read-side helpers over block and pending snapshots.

use anchorchain_canonical::CalendarDate;
use anchorchain_core::{Block, VerificationEvent};

use crate::filter::EventFilter;
use crate::traits::PendingPool;

/// A pending event matched by a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMatch {
    /// Date bucket holding the event.
    pub date: CalendarDate,
    /// The matched event.
    pub event: VerificationEvent,
    /// Number of events pending for that date.
    pub pending_count: usize,
}

/// Finds the newest sealed event matching `filter`.
///
/// Blocks are scanned newest to oldest and, within a block, the most
/// recently appended event wins. This is a full scan.
pub fn latest_sealed_match(
    blocks: &[Block],
    filter: &dyn EventFilter,
) -> Option<(VerificationEvent, Block)> {
    blocks.iter().rev().find_map(|block| {
        block
            .events
            .iter()
            .rev()
            .find(|event| filter.matches(event))
            .map(|event| (event.clone(), block.clone()))
    })
}

/// Finds the newest pending event matching `filter`, newest date first.
pub fn latest_pending_match(pending: &PendingPool, filter: &dyn EventFilter) -> Option<PendingMatch> {
    pending.iter().rev().find_map(|(date, events)| {
        events
            .iter()
            .rev()
            .find(|event| filter.matches(event))
            .map(|event| PendingMatch {
                date: date.clone(),
                event: event.clone(),
                pending_count: events.len(),
            })
    })
}

/// Number of events sealed in non-genesis blocks.
pub fn sealed_event_count(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .filter(|block| !block.is_genesis())
        .map(|block| block.events.len())
        .sum()
}
