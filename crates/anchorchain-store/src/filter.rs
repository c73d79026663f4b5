//! Event filtering for proof lookups.

use anchorchain_canonical::{CalendarDate, Timestamp};
use anchorchain_core::{VerificationEvent, VerificationStatus};

/// Predicate over recorded events.
pub trait EventFilter {
    /// Returns true if the event matches the filter criteria.
    fn matches(&self, event: &VerificationEvent) -> bool;
}

/// Filter by code identifier.
#[derive(Debug, Clone)]
pub struct CodeIdFilter {
    /// Code identifier to match exactly.
    pub code_id: String,
}

impl CodeIdFilter {
    /// Creates a filter for one code.
    pub fn new(code_id: impl Into<String>) -> Self {
        Self {
            code_id: code_id.into(),
        }
    }
}

impl EventFilter for CodeIdFilter {
    fn matches(&self, event: &VerificationEvent) -> bool {
        event.code_id == self.code_id
    }
}

/// Filter by exact verification timestamp.
#[derive(Debug, Clone)]
pub struct TimestampFilter {
    /// Timestamp to match exactly.
    pub timestamp: Timestamp,
}

impl EventFilter for TimestampFilter {
    fn matches(&self, event: &VerificationEvent) -> bool {
        event.timestamp == self.timestamp
    }
}

/// Filter by verification outcome.
#[derive(Debug, Clone, Copy)]
pub struct StatusFilter {
    /// Status to match.
    pub status: VerificationStatus,
}

impl EventFilter for StatusFilter {
    fn matches(&self, event: &VerificationEvent) -> bool {
        event.status == self.status
    }
}

/// Filter by date bucket range (both bounds inclusive).
#[derive(Debug, Clone, Default)]
pub struct DateRangeFilter {
    /// Earliest date to include.
    pub from: Option<CalendarDate>,
    /// Latest date to include.
    pub to: Option<CalendarDate>,
}

impl EventFilter for DateRangeFilter {
    fn matches(&self, event: &VerificationEvent) -> bool {
        let date = event.date();
        self.from.as_ref().map_or(true, |from| &date >= from)
            && self.to.as_ref().map_or(true, |to| &date <= to)
    }
}

/// Composite filter: all filters must match (AND).
#[derive(Default)]
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn EventFilter + Send + Sync>>,
}

impl AndFilter {
    /// Adds a filter to the conjunction.
    pub fn with(mut self, filter: impl EventFilter + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl EventFilter for AndFilter {
    fn matches(&self, event: &VerificationEvent) -> bool {
        self.filters.iter().all(|f| f.matches(event))
    }
}
