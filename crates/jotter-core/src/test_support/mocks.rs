//! Mock Implementations for Testing
//!
//! Hand-written mocks of the form's collaborators. Each one is:
//!
//! - **Observable**: counts calls and records arguments for assertions
//! - **Configurable**: can fail on demand
//! - **Controllable**: [`MockNoteStore::gated`] holds every create until the
//!   test calls [`MockNoteStore::release`], which keeps a submission pending
//!   for as long as a test needs
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use jotter_core::test_support::mocks::{CountingInvalidator, MockNoteStore, RecordingHost};
//! use jotter_core::{CacheReconciler, FormController, SubmissionCoordinator};
//!
//! # async fn example() {
//! let store = Arc::new(MockNoteStore::succeeding());
//! let invalidator = Arc::new(CountingInvalidator::new());
//! let host = Arc::new(RecordingHost::new());
//!
//! let coordinator =
//!     SubmissionCoordinator::new(store.clone(), CacheReconciler::for_notes(invalidator.clone()));
//! let form = FormController::new(coordinator, host.clone());
//! form.cancel();
//!
//! assert_eq!(host.calls(), 1);
//! assert_eq!(store.create_calls(), 0);
//! assert_eq!(invalidator.count(), 0);
//! # }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::cache::{CacheInvalidator, CacheKey};
use crate::form::FormHost;
use crate::note::{Note, NoteDraft};
use crate::storage::{NoteStore, StoreError, StoreResult};

// ============================================================================
// Mock Note Store
// ============================================================================

/// Mock note store with call tracking and failure injection
pub struct MockNoteStore {
    fail: AtomicBool,
    gate: Option<Semaphore>,
    create_calls: AtomicUsize,
    drafts: Mutex<Vec<NoteDraft>>,
    created: Mutex<Vec<Note>>,
}

impl MockNoteStore {
    fn with(fail: bool, gate: Option<Semaphore>) -> Self {
        Self {
            fail: AtomicBool::new(fail),
            gate,
            create_calls: AtomicUsize::new(0),
            drafts: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Every create succeeds immediately
    pub fn succeeding() -> Self {
        Self::with(false, None)
    }

    /// Every create fails with a network error
    pub fn failing() -> Self {
        Self::with(true, None)
    }

    /// Every create waits for [`release`](Self::release) before succeeding
    pub fn gated() -> Self {
        Self::with(false, Some(Semaphore::new(0)))
    }

    /// Gated, and fails once released
    pub fn gated_failing() -> Self {
        Self::with(true, Some(Semaphore::new(0)))
    }

    /// Let one gated create proceed
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `create_note` calls, including ones still waiting at the gate
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Drafts passed to `create_note`, in call order
    pub fn drafts(&self) -> Vec<NoteDraft> {
        self.drafts.lock().clone()
    }

    /// Notes successfully created, in call order
    pub fn created(&self) -> Vec<Note> {
        self.created.lock().clone()
    }

    /// Yield until at least `n` creates have been issued
    pub async fn wait_for_calls(&self, n: usize) {
        while self.create_calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl NoteStore for MockNoteStore {
    async fn create_note(&self, draft: NoteDraft) -> StoreResult<Note> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.drafts.lock().push(draft.clone());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|_| StoreError::backend("mock gate closed"))?
                .forget();
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::network("mock network failure"));
        }

        let note = Note::from_draft(draft);
        self.created.lock().push(note.clone());
        Ok(note)
    }

    async fn list_notes(&self, _search: Option<&str>) -> StoreResult<Vec<Note>> {
        Ok(self.created.lock().iter().rev().cloned().collect())
    }
}

// ============================================================================
// Counting Invalidator
// ============================================================================

/// Records every invalidation instead of touching a cache
#[derive(Default)]
pub struct CountingInvalidator {
    keys: Mutex<Vec<CacheKey>>,
}

impl CountingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.keys.lock().len()
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        self.keys.lock().clone()
    }
}

#[async_trait]
impl CacheInvalidator for CountingInvalidator {
    async fn invalidate(&self, key: &CacheKey) -> usize {
        self.keys.lock().push(key.clone());
        0
    }
}

// ============================================================================
// Stalling Invalidator
// ============================================================================

/// First invalidation never completes; later ones complete at once
///
/// Lets a test drop a submission while it is reconciling the cache.
#[derive(Default)]
pub struct StallingInvalidator {
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl StallingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheInvalidator for StallingInvalidator {
    async fn invalidate(&self, _key: &CacheKey) -> usize {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            std::future::pending::<()>().await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        0
    }
}

// ============================================================================
// Recording Host
// ============================================================================

/// Counts `on_cancel` callbacks
#[derive(Default)]
pub struct RecordingHost {
    calls: AtomicUsize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FormHost for RecordingHost {
    fn on_cancel(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
