// Thread-safe collector handle
// One lock guards heap and root set together, and `collect` holds it for the
// whole cycle so no other thread can mutate mid-collection.

use super::collector::Collector;
use super::snapshot::HeapSnapshot;
use super::stats::{CollectionStats, GcStats};
use crate::error::GcResult;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

pub struct SharedCollector<P> {
    inner: Arc<Mutex<Collector<P>>>,
}

impl<P> SharedCollector<P> {
    pub fn new(collector: Collector<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(collector)),
        }
    }

    /// Exclusive access for a batch of mutations
    pub fn lock(&self) -> MutexGuard<'_, Collector<P>> {
        self.inner.lock()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Collector<P>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn collect(&self) -> GcResult<CollectionStats> {
        self.inner.lock().collect()
    }

    pub fn get_stats(&self) -> GcStats {
        self.inner.lock().get_stats()
    }

    pub fn snapshot(&self) -> HeapSnapshot {
        self.inner.lock().snapshot()
    }
}

impl<P> Clone for SharedCollector<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> Default for SharedCollector<P> {
    fn default() -> Self {
        Self::new(Collector::new())
    }
}
