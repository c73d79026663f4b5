use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// Hands out one exclusive lock per storage identity.
///
/// Ledger handles built from the same registry over the same storage share
/// a lock, so their operations serialize even though the handles are
/// distinct values. Cloning the registry shares its table.
#[derive(Debug, Clone, Default)]
pub struct LockRegistry {
    locks: Arc<Mutex<HashMap<String, Arc<LedgerLock>>>>,
}

impl LockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for a storage identity, created on first request.
    pub fn lock_for(&self, identity: &str) -> Arc<LedgerLock> {
        self.locks
            .lock()
            .entry(identity.to_string())
            .or_insert_with(|| Arc::new(LedgerLock::new(identity)))
            .clone()
    }

    /// Number of identities with a lock.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// True when no lock has been handed out yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutual-exclusion scope guarding one ledger.
#[derive(Debug)]
pub struct LedgerLock {
    identity: String,
    inner: Mutex<()>,
}

impl LedgerLock {
    fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            inner: Mutex::new(()),
        }
    }

    /// Storage identity this lock guards.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Blocks until the scope is free and enters it.
    pub fn enter(&self) -> MutexGuard<'_, ()> {
        self.inner.lock()
    }
}
