use std::sync::Arc;

use anchorchain_canonical::{CalendarDate, Timestamp};
use anchorchain_core::{Block, ChainReport, VerificationEvent};
use anchorchain_store::{EventFilter, LedgerStore};

use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::errors::ChainError;
use crate::guard::{LedgerLock, LockRegistry};
use crate::manager::ChainManager;
use crate::proof::EventProof;
use crate::status::StatusSummary;

/// Shareable handle to one ledger.
///
/// Every operation runs inside the ledger's exclusive scope, which is keyed
/// by the store identity through a [`LockRegistry`]. Clones share the
/// manager and the scope.
pub struct Ledger<S> {
    manager: Arc<ChainManager<S>>,
    lock: Arc<LedgerLock>,
}

impl<S> Clone for Ledger<S> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            lock: Arc::clone(&self.lock),
        }
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Opens a ledger with its own lock registry and the system clock.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self::with_registry(store, config, Arc::new(SystemClock), &LockRegistry::new())
    }

    /// Opens a ledger whose scope is taken from `registry`, so handles over
    /// the same storage built from one registry exclude each other.
    pub fn with_registry(
        store: S,
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        registry: &LockRegistry,
    ) -> Self {
        let lock = registry.lock_for(&store.identity());
        Self {
            manager: Arc::new(ChainManager::new(store, config, clock)),
            lock,
        }
    }

    /// Storage identity the scope is keyed by.
    pub fn identity(&self) -> &str {
        self.lock.identity()
    }

    /// Runs `f` with exclusive access to the chain.
    pub fn with_exclusive_access<T>(&self, f: impl FnOnce(&ChainManager<S>) -> T) -> T {
        let _scope = self.lock.enter();
        f(&self.manager)
    }

    /// See [`ChainManager::record_event`].
    pub fn record_event(&self, event: VerificationEvent) -> Result<Vec<Block>, ChainError> {
        self.with_exclusive_access(|chain| chain.record_event(event))
    }

    /// See [`ChainManager::anchor_pending_up_to`].
    pub fn anchor_pending_up_to(&self, cutoff: &CalendarDate) -> Result<Vec<Block>, ChainError> {
        self.with_exclusive_access(|chain| chain.anchor_pending_up_to(cutoff))
    }

    /// See [`ChainManager::proof_for_event`].
    pub fn proof_for_event(
        &self,
        code_id: &str,
        timestamp: Option<&Timestamp>,
    ) -> Result<Option<EventProof>, ChainError> {
        self.with_exclusive_access(|chain| chain.proof_for_event(code_id, timestamp))
    }

    /// See [`ChainManager::status_summary`].
    pub fn status_summary(&self) -> Result<StatusSummary, ChainError> {
        self.with_exclusive_access(|chain| chain.status_summary())
    }

    /// See [`ChainManager::blocks`].
    pub fn blocks(&self) -> Result<Vec<Block>, ChainError> {
        self.with_exclusive_access(|chain| chain.blocks())
    }

    /// See [`ChainManager::sealed_events`].
    pub fn sealed_events(
        &self,
        filter: &dyn EventFilter,
    ) -> Result<Vec<(u64, VerificationEvent)>, ChainError> {
        self.with_exclusive_access(|chain| chain.sealed_events(filter))
    }

    /// See [`ChainManager::verify`].
    pub fn verify(&self) -> Result<ChainReport, ChainError> {
        self.with_exclusive_access(|chain| chain.verify())
    }
}
