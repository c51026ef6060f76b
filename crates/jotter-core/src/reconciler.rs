//! Cache reconciliation after confirmed writes
//!
//! A successful create never inserts the new note into the shared cache.
//! The reconciler only marks the notes collection stale, so the next read
//! refetches what the server actually holds.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheInvalidator, CacheKey};

#[derive(Clone)]
pub struct CacheReconciler {
    invalidator: Arc<dyn CacheInvalidator>,
    key: CacheKey,
}

impl CacheReconciler {
    pub fn new(invalidator: Arc<dyn CacheInvalidator>, key: CacheKey) -> Self {
        Self { invalidator, key }
    }

    /// Reconciler for the `["notes"]` collection
    pub fn for_notes(invalidator: Arc<dyn CacheInvalidator>) -> Self {
        Self::new(invalidator, CacheKey::notes())
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Mark the collection stale; returns how many cached entries were marked
    pub async fn reconcile(&self) -> usize {
        let marked = self.invalidator.invalidate(&self.key).await;
        debug!(key = %self.key, marked, "Reconciled notes cache after write");
        marked
    }
}
