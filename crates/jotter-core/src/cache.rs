//! Shared notes cache
//!
//! Every view that lists notes reads through one [`NotesCache`]. Entries are
//! keyed by [`CacheKey`] and are never edited in place: writes elsewhere
//! mark them stale via [`NotesCache::invalidate`], and the next read
//! refetches from the note store.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use jotter_core::cache::{CacheKey, NotesCache};
//! use jotter_core::storage::{InMemoryNoteStore, NoteStore};
//!
//! # async fn example() -> Result<(), jotter_core::storage::StoreError> {
//! let cache = Arc::new(NotesCache::new(None));
//! let store = InMemoryNoteStore::new();
//!
//! let notes = cache
//!     .get_or_fetch(&CacheKey::notes(), || store.list_notes(None))
//!     .await?;
//!
//! // After a create lands, mark the collection stale
//! cache.invalidate(&CacheKey::notes()).await;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::note::Note;
use crate::storage::StoreResult;

/// Key of a cached notes query, as ordered segments
///
/// `["notes"]` is the whole collection; `["notes", "milk"]` is a filtered
/// view of it. Invalidation matches by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(Vec<String>);

impl CacheKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The whole notes collection
    pub fn notes() -> Self {
        Self::new(["notes"])
    }

    /// Extend with one more segment
    #[must_use]
    pub fn with(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    notes: Vec<Note>,
    fetched_at: Instant,
    stale: bool,
}

impl CacheEntry {
    fn is_stale(&self, stale_after: Option<Duration>) -> bool {
        self.stale || stale_after.is_some_and(|ttl| self.fetched_at.elapsed() > ttl)
    }
}

/// Anything that can mark keyed collections stale
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Mark every entry under `key` stale; returns how many were marked
    async fn invalidate(&self, key: &CacheKey) -> usize;
}

/// How a read was served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheRead {
    /// A fresh cached entry
    Hit,
    /// The fetch ran because the entry was missing or stale
    Fetched,
}

struct InFlight {
    key: CacheKey,
    invalidated: bool,
}

/// Drops the in-flight record of a fetch that errored or was cancelled
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashMap<u64, InFlight>>,
    id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.id);
    }
}

/// Notes cache shared by every form and view
///
/// Create one at startup and pass it around in an `Arc`.
pub struct NotesCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    stale_after: Option<Duration>,
    // Fetches in flight; an invalidation covering one flags it so the
    // result is stored stale.
    in_flight: Mutex<HashMap<u64, InFlight>>,
    next_fetch: AtomicU64,
    invalidations: AtomicU64,
}

impl NotesCache {
    /// `stale_after` adds time-based staleness on top of invalidation
    pub fn new(stale_after: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_after,
            in_flight: Mutex::new(HashMap::new()),
            next_fetch: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Cached notes for `key`, or the result of `fetch` if the entry is
    /// missing or stale
    pub async fn get_or_fetch<F, Fut>(&self, key: &CacheKey, fetch: F) -> StoreResult<Vec<Note>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = StoreResult<Vec<Note>>>,
    {
        self.read(key, fetch).await.map(|(notes, _)| notes)
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch), also reporting whether
    /// the cache served the read
    pub async fn read<F, Fut>(&self, key: &CacheKey, fetch: F) -> StoreResult<(Vec<Note>, CacheRead)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = StoreResult<Vec<Note>>>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(key) {
                if !entry.is_stale(self.stale_after) {
                    return Ok((entry.notes.clone(), CacheRead::Hit));
                }
            }
        }

        debug!(%key, "Refetching notes");
        let id = self.next_fetch.fetch_add(1, Ordering::SeqCst);
        self.in_flight.lock().insert(
            id,
            InFlight {
                key: key.clone(),
                invalidated: false,
            },
        );
        let _guard = InFlightGuard {
            in_flight: &self.in_flight,
            id,
        };

        let notes = fetch().await?;

        // Taken before the flag is read; invalidate flags under the same lock
        let mut entries = self.entries.write().await;
        let invalidated = self
            .in_flight
            .lock()
            .remove(&id)
            .is_some_and(|fetch| fetch.invalidated);
        entries.insert(
            key.clone(),
            CacheEntry {
                notes: notes.clone(),
                fetched_at: Instant::now(),
                stale: invalidated,
            },
        );

        Ok((notes, CacheRead::Fetched))
    }

    /// Cached notes for `key` without fetching, stale or not
    pub async fn peek(&self, key: &CacheKey) -> Option<Vec<Note>> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.notes.clone())
    }

    /// True if the next read of `key` will refetch
    pub async fn is_stale(&self, key: &CacheKey) -> bool {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .map_or(true, |entry| entry.is_stale(self.stale_after))
    }

    /// Mark every entry whose key starts with `prefix` stale, including
    /// fetches still in flight for such keys
    pub async fn invalidate(&self, prefix: &CacheKey) -> usize {
        self.invalidations.fetch_add(1, Ordering::SeqCst);

        let mut entries = self.entries.write().await;
        for fetch in self.in_flight.lock().values_mut() {
            if fetch.key.starts_with(prefix) {
                fetch.invalidated = true;
            }
        }

        let mut marked = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                marked += 1;
            }
        }

        debug!(%prefix, marked, "Invalidated notes cache");
        marked
    }

    /// Number of invalidations seen since creation
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheInvalidator for NotesCache {
    async fn invalidate(&self, key: &CacheKey) -> usize {
        NotesCache::invalidate(self, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::{NoteDraft, NoteTag};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    fn note(title: &str) -> Note {
        Note::from_draft(NoteDraft::new(title, "some content", NoteTag::Todo))
    }

    #[tokio::test]
    async fn test_cache_returns_cached_until_invalidated() {
        let cache = NotesCache::new(None);
        let key = CacheKey::notes();
        let call_count = Arc::new(AtomicUsize::new(0));

        let count1 = Arc::clone(&call_count);
        let first = cache
            .get_or_fetch(&key, || async move {
                count1.fetch_add(1, Ordering::SeqCst);
                Ok(vec![note("first")])
            })
            .await
            .unwrap();
        assert_eq!(first[0].title, "first");

        let count2 = Arc::clone(&call_count);
        let second = cache
            .get_or_fetch(&key, || async move {
                count2.fetch_add(1, Ordering::SeqCst);
                Ok(vec![note("second")])
            })
            .await
            .unwrap();
        assert_eq!(call_count.load(Ordering::SeqCst), 1, "Should use cache");
        assert_eq!(second[0].title, "first");

        assert_eq!(cache.invalidate(&key).await, 1);
        assert!(cache.is_stale(&key).await);

        let count3 = Arc::clone(&call_count);
        let third = cache
            .get_or_fetch(&key, || async move {
                count3.fetch_add(1, Ordering::SeqCst);
                Ok(vec![note("third")])
            })
            .await
            .unwrap();
        assert_eq!(call_count.load(Ordering::SeqCst), 2, "Should refetch");
        assert_eq!(third[0].title, "third");
        assert!(!cache.is_stale(&key).await);
    }

    #[tokio::test]
    async fn test_invalidate_matches_prefix() {
        let cache = NotesCache::new(None);
        let all = CacheKey::notes();
        let filtered = CacheKey::notes().with("milk");
        let other = CacheKey::new(["drafts"]);

        for key in [&all, &filtered, &other] {
            cache
                .get_or_fetch(key, || async { Ok(Vec::new()) })
                .await
                .unwrap();
        }

        assert_eq!(cache.invalidate(&CacheKey::notes()).await, 2);
        assert!(cache.is_stale(&all).await);
        assert!(cache.is_stale(&filtered).await);
        assert!(!cache.is_stale(&other).await);
    }

    #[tokio::test]
    async fn test_stale_entry_still_peekable() {
        let cache = NotesCache::new(None);
        let key = CacheKey::notes();
        cache
            .get_or_fetch(&key, || async { Ok(vec![note("kept")]) })
            .await
            .unwrap();

        cache.invalidate(&key).await;
        let peeked = cache.peek(&key).await.unwrap();
        assert_eq!(peeked[0].title, "kept");
    }

    #[tokio::test]
    async fn test_missing_entry_counts_as_stale() {
        let cache = NotesCache::new(None);
        assert!(cache.is_stale(&CacheKey::notes()).await);
        assert_eq!(cache.invalidate(&CacheKey::notes()).await, 0);
        assert_eq!(cache.invalidation_count(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_during_fetch_keeps_entry_stale() {
        let cache = NotesCache::new(None);
        let key = CacheKey::notes();

        cache
            .get_or_fetch(&key, || async {
                // A write lands while the read is in flight.
                cache.invalidate(&CacheKey::notes()).await;
                Ok(vec![note("possibly outdated")])
            })
            .await
            .unwrap();

        assert!(cache.is_stale(&key).await);
    }

    #[tokio::test]
    async fn test_unrelated_invalidate_during_fetch_keeps_entry_fresh() {
        let cache = NotesCache::new(None);
        let key = CacheKey::notes();

        cache
            .get_or_fetch(&key, || async {
                cache.invalidate(&CacheKey::new(["drafts"])).await;
                Ok(vec![note("current")])
            })
            .await
            .unwrap();

        assert!(!cache.is_stale(&key).await);
        assert_eq!(cache.invalidation_count(), 1);
    }

    #[tokio::test]
    async fn test_parent_invalidate_during_filtered_fetch_marks_it_stale() {
        let cache = NotesCache::new(None);
        let filtered = CacheKey::notes().with("milk");

        cache
            .get_or_fetch(&filtered, || async {
                cache.invalidate(&CacheKey::notes()).await;
                Ok(Vec::new())
            })
            .await
            .unwrap();

        assert!(cache.is_stale(&filtered).await);
    }

    #[tokio::test]
    async fn test_read_reports_how_it_was_served() {
        let cache = NotesCache::new(None);
        let key = CacheKey::notes();

        let (_, served) = cache.read(&key, || async { Ok(Vec::new()) }).await.unwrap();
        assert_eq!(served, CacheRead::Fetched);

        let (_, served) = cache
            .read(&key, || async {
                Err(crate::storage::StoreError::backend("fresh entry must not refetch"))
            })
            .await
            .unwrap();
        assert_eq!(served, CacheRead::Hit);

        cache.invalidate(&key).await;
        let (_, served) = cache.read(&key, || async { Ok(Vec::new()) }).await.unwrap();
        assert_eq!(served, CacheRead::Fetched);
    }

    #[tokio::test]
    async fn test_fetch_error_is_not_cached() {
        let cache = NotesCache::new(None);
        let key = CacheKey::notes();

        let result = cache
            .get_or_fetch(&key, || async {
                Err(crate::storage::StoreError::network("offline"))
            })
            .await;
        assert!(result.is_err());
        assert!(cache.peek(&key).await.is_none());
        assert!(cache.in_flight.lock().is_empty());
    }

    #[tokio::test]
    async fn test_time_based_staleness() {
        let cache = NotesCache::new(Some(Duration::from_millis(10)));
        let key = CacheKey::notes();
        cache
            .get_or_fetch(&key, || async { Ok(Vec::new()) })
            .await
            .unwrap();
        assert!(!cache.is_stale(&key).await);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.is_stale(&key).await);
    }

    #[test]
    fn test_cache_key_display() {
        assert_eq!(CacheKey::notes().with("milk").to_string(), "[notes, milk]");
    }
}
