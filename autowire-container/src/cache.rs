//! Lifecycle cache: memoized instances of shared keys.
//!
//! Entries are written lazily by `get` for shared keys and eagerly by
//! `set`, `singleton` and `register`. A `get` never replaces an existing
//! entry: the first write wins.

use std::collections::HashMap;

use tracing::trace;

use crate::definition::Instance;
use crate::key::ServiceKey;
use crate::registry::FactoryFn;

/// A cached value for one key.
#[derive(Clone)]
pub(crate) enum CacheEntry {
    /// A resolved value, returned as is.
    Resolved(Instance),
    /// An unevaluated factory placed with `set`, invoked on every `get`.
    Deferred(FactoryFn),
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheEntry::Resolved(instance) => f.debug_tuple("Resolved").field(instance).finish(),
            CacheEntry::Deferred(_) => f.write_str("Deferred(<fn>)"),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct LifecycleCache {
    entries: HashMap<ServiceKey, CacheEntry>,
}

impl LifecycleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the entry for `key`.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).cloned()
    }

    /// Explicit write: always overwrites.
    pub fn put(&mut self, key: ServiceKey, entry: CacheEntry) {
        trace!(key = %key, entry = ?entry, "Cache write");
        self.entries.insert(key, entry);
    }

    /// Lazy write from a resolution: keeps an existing resolved value.
    ///
    /// Returns the value now associated with `key`, which is the earlier
    /// instance if one was cached while `instance` was being built.
    pub fn insert_if_absent(&mut self, key: ServiceKey, instance: Instance) -> Instance {
        match self.entries.get(&key) {
            Some(CacheEntry::Resolved(existing)) => existing.clone(),
            Some(CacheEntry::Deferred(_)) => instance,
            None => {
                trace!(key = %key, "Cached shared instance");
                self.entries.insert(key, CacheEntry::Resolved(instance.clone()));
                instance
            }
        }
    }

    /// Drops the entry for `key`, if any.
    pub fn evict(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
