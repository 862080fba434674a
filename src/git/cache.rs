//! Call deduplication for repository adapters
//!
//! An [`InflightCache`] is owned by whoever builds the adapter; there is no
//! global instance. While an operation for a key is running, further callers
//! for that key wait and share its outcome. Once the operation settles,
//! successfully or not, the entry is evicted and the next call runs afresh.

use crate::domain::CommitRecord;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::debug;

type Slot<V> = Arc<OnceLock<V>>;

/// Deduplicates concurrent calls that share a key
pub struct InflightCache<K, V> {
    entries: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> InflightCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        InflightCache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Slot<V>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `operation` for `key`, or join the run already in flight
    pub fn get_or_run<F>(&self, key: K, operation: F) -> V
    where
        F: FnOnce() -> V,
    {
        let slot = Arc::clone(
            self.lock()
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceLock::new())),
        );

        let value = slot.get_or_init(operation).clone();

        let mut entries = self.lock();
        if entries
            .get(&key)
            .is_some_and(|current| Arc::ptr_eq(current, &slot))
        {
            entries.remove(&key);
        }

        value
    }

    /// Callers currently attached to the in-flight run for `key`
    pub fn attached(&self, key: &K) -> usize {
        self.lock()
            .get(key)
            .map_or(0, |slot| Arc::strong_count(slot) - 1)
    }

    /// Number of keys with a run in flight
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for InflightCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

type Shared<T> = std::result::Result<T, Arc<ReleaseError>>;

/// Repository adapter that deduplicates concurrent identical calls
pub struct CachedRepository<R> {
    inner: R,
    tags: InflightCache<(), Shared<Vec<String>>>,
    commits: InflightCache<(Option<String>, String), Shared<Vec<CommitRecord>>>,
}

impl<R: Repository> CachedRepository<R> {
    pub fn new(inner: R) -> Self {
        CachedRepository {
            inner,
            tags: InflightCache::new(),
            commits: InflightCache::new(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Repository> Repository for CachedRepository<R> {
    fn list_tags(&self) -> Result<Vec<String>> {
        self.tags
            .get_or_run((), || {
                debug!("fetching tag list");
                self.inner.list_tags().map_err(Arc::new)
            })
            .map_err(ReleaseError::from)
    }

    fn commits_since(&self, since_tag: Option<&str>, rev: &str) -> Result<Vec<CommitRecord>> {
        let key = (since_tag.map(str::to_string), rev.to_string());
        self.commits
            .get_or_run(key, || {
                debug!(since = since_tag.unwrap_or("<root>"), rev, "fetching commits");
                self.inner.commits_since(since_tag, rev).map_err(Arc::new)
            })
            .map_err(ReleaseError::from)
    }
}
