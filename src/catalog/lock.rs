//! Serialization of catalog updates.
//!
//! [`AlleleCatalog::assign`](crate::catalog::store::AlleleCatalog::assign)
//! reads the largest identifier and then appends, so two writers on the same
//! locus could hand out the same identifier. Every load-and-assign sequence runs
//! inside [`CatalogLock::serialize`] for its locus.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Strategy for serializing catalog critical sections per locus
pub trait CatalogLock: Sync {
    /// Run `critical` while no other critical section for `locus` runs
    fn serialize<T>(&self, locus: &str, critical: impl FnOnce() -> T) -> T;
}

/// No locking, for strictly sequential use
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlocked;

impl CatalogLock for Unlocked {
    fn serialize<T>(&self, _locus: &str, critical: impl FnOnce() -> T) -> T {
        critical()
    }
}

/// One mutex per locus name; different loci proceed in parallel
#[derive(Debug, Default)]
pub struct LocusLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LocusLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, locus: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(locus.to_string()).or_default())
    }
}

impl CatalogLock for LocusLocks {
    fn serialize<T>(&self, locus: &str, critical: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(locus);
        // The mutex guards no data, so poisoning is ignored
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        critical()
    }
}
