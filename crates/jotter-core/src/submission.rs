//! Submission coordination
//!
//! The [`SubmissionCoordinator`] owns the state machine for creating one
//! note at a time:
//!
//! ```text
//! Idle | Succeeded | Failed ──submit──▶ Pending ──ok──▶ Succeeded
//!                                          └────err──▶ Failed(reason)
//! ```
//!
//! A submit while `Pending` is ignored: no store call and no state change.
//! On success the cache reconciler marks the notes collection stale. Failures
//! are never retried here; the user resubmits.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::note::{Note, NoteDraft};
use crate::reconciler::CacheReconciler;
use crate::storage::NoteStore;

/// Banner text shown for any failed submission
pub const SUBMISSION_ERROR_MESSAGE: &str = "Failed to save note. Try again.";

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    /// Holds the record the store assigned
    Succeeded(Note),
    /// Holds the store's reason; users only ever see [`SUBMISSION_ERROR_MESSAGE`]
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    /// Message for the presentation layer, if any
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            SubmissionState::Failed(_) => Some(SUBMISSION_ERROR_MESSAGE),
            _ => None,
        }
    }
}

/// Broadcast to listeners as a submission progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    Started,
    Succeeded(Note),
    Failed { reason: String },
}

/// Settles a submission whose future is dropped before it finishes
///
/// Dropped before the store answered: `Failed`. Dropped after the note was
/// created: the save stands, and the cache is reconciled on a spawned task.
struct PendingGuard<'a> {
    state: &'a Mutex<SubmissionState>,
    reconciler: &'a CacheReconciler,
    events: &'a broadcast::Sender<SubmissionEvent>,
    created: Option<Note>,
    finished: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        let Some(note) = self.created.take() else {
            let mut state = self.state.lock();
            if state.is_pending() {
                warn!("Submission dropped before the store answered");
                *state = SubmissionState::Failed("submission abandoned".to_string());
            }
            return;
        };

        warn!(note_id = %note.id, "Submission dropped after the note was created");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let reconciler = self.reconciler.clone();
                handle.spawn(async move {
                    reconciler.reconcile().await;
                });
            }
            Err(_) => warn!(key = %self.reconciler.key(), "No runtime left to reconcile the notes cache"),
        }
        let _ = self.events.send(SubmissionEvent::Succeeded(note));
    }
}

pub struct SubmissionCoordinator {
    store: Arc<dyn NoteStore>,
    reconciler: CacheReconciler,
    state: Mutex<SubmissionState>,
    events: broadcast::Sender<SubmissionEvent>,
}

impl SubmissionCoordinator {
    pub fn new(store: Arc<dyn NoteStore>, reconciler: CacheReconciler) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            reconciler,
            state: Mutex::new(SubmissionState::Idle),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SubmissionState {
        self.state.lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().is_pending()
    }

    /// Return to `Idle`. Refused while a submission is in flight.
    pub fn reset(&self) -> bool {
        let mut state = self.state.lock();
        if state.is_pending() {
            return false;
        }
        *state = SubmissionState::Idle;
        true
    }

    /// Create a note from an already validated draft
    ///
    /// Returns the state the submission settled in, or `Pending` unchanged
    /// if another submission was already in flight.
    #[instrument(skip(self, draft), fields(tag = %draft.tag))]
    pub async fn submit(&self, draft: NoteDraft) -> SubmissionState {
        {
            let mut state = self.state.lock();
            if state.is_pending() {
                debug!("Submission already pending, ignoring submit");
                return SubmissionState::Pending;
            }
            debug!(from = ?*state, "Submission pending");
            *state = SubmissionState::Pending;
        }
        // No subscribers is fine
        let _ = self.events.send(SubmissionEvent::Started);

        let mut guard = PendingGuard {
            state: &self.state,
            reconciler: &self.reconciler,
            events: &self.events,
            created: None,
            finished: false,
        };
        let result = self.store.create_note(draft).await;

        match result {
            Ok(note) => {
                info!(note_id = %note.id, "Note created");
                // The write has landed; record it before the reconcile await
                let settled = SubmissionState::Succeeded(note.clone());
                *self.state.lock() = settled.clone();
                guard.created = Some(note.clone());

                self.reconciler.reconcile().await;
                guard.finished = true;
                let _ = self.events.send(SubmissionEvent::Succeeded(note));
                settled
            }
            Err(err) => {
                warn!(error = %err, "Note creation failed");
                guard.finished = true;
                let settled = SubmissionState::Failed(err.to_string());
                *self.state.lock() = settled.clone();
                let _ = self.events.send(SubmissionEvent::Failed {
                    reason: err.to_string(),
                });
                settled
            }
        }
    }
}
