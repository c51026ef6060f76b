//! In-memory NoteStore
//!
//! Stands in for the remote note service when running the form locally.
//! Latency and create failures can be simulated from [`StoreComponentConfig`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use jotter_config::StoreComponentConfig;
use parking_lot::RwLock;
use tracing::debug;

use crate::note::{Note, NoteDraft};
use crate::storage::{NoteStore, StoreError, StoreResult};

pub struct InMemoryNoteStore {
    notes: RwLock<Vec<Note>>,
    latency: Option<Duration>,
    fail_creates: AtomicBool,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(Vec::new()),
            latency: None,
            fail_creates: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &StoreComponentConfig) -> Self {
        Self {
            notes: RwLock::new(Vec::new()),
            latency: config.latency(),
            fail_creates: AtomicBool::new(config.fail_creates),
        }
    }

    /// Toggle create failures at runtime
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for InMemoryNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn create_note(&self, draft: NoteDraft) -> StoreResult<Note> {
        self.simulate_latency().await;

        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(StoreError::network("simulated create failure"));
        }

        let note = Note::from_draft(draft);
        debug!(note_id = %note.id, "Stored note");
        self.notes.write().push(note.clone());
        Ok(note)
    }

    async fn list_notes(&self, search: Option<&str>) -> StoreResult<Vec<Note>> {
        self.simulate_latency().await;

        let needle = search.map(str::to_lowercase);
        let notes = self.notes.read();
        // Newest first
        let listed = notes
            .iter()
            .rev()
            .filter(|note| match &needle {
                Some(needle) => {
                    note.title.to_lowercase().contains(needle)
                        || note.content.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteTag;

    #[tokio::test]
    async fn test_create_then_list_newest_first() {
        let store = InMemoryNoteStore::new();
        store
            .create_note(NoteDraft::new("First", "first note", NoteTag::Todo))
            .await
            .unwrap();
        store
            .create_note(NoteDraft::new("Second", "second note", NoteTag::Work))
            .await
            .unwrap();

        let notes = store.list_notes(None).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "Second");
        assert_eq!(notes[1].title, "First");
    }

    #[tokio::test]
    async fn test_identical_drafts_create_distinct_notes() {
        let store = InMemoryNoteStore::new();
        let draft = NoteDraft::new("Buy milk", "2% organic", NoteTag::Shopping);

        let a = store.create_note(draft.clone()).await.unwrap();
        let b = store.create_note(draft).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let store = InMemoryNoteStore::new();
        store
            .create_note(NoteDraft::new("Buy milk", "2% organic", NoteTag::Shopping))
            .await
            .unwrap();
        store
            .create_note(NoteDraft::new("Standup", "Daily sync", NoteTag::Meeting))
            .await
            .unwrap();

        let hits = store.list_notes(Some("MILK")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tag, NoteTag::Shopping);

        let hits = store.list_notes(Some("sync")).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_creates_leaves_store_empty() {
        let store = InMemoryNoteStore::from_config(&StoreComponentConfig {
            latency_ms: 0,
            fail_creates: true,
        });

        let result = store
            .create_note(NoteDraft::new("Title", "Content", NoteTag::Todo))
            .await;
        assert!(matches!(result, Err(StoreError::Network(_))));
        assert!(store.is_empty());

        store.set_fail_creates(false);
        assert!(store
            .create_note(NoteDraft::new("Title", "Content", NoteTag::Todo))
            .await
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let store = InMemoryNoteStore::from_config(&StoreComponentConfig {
            latency_ms: 500,
            fail_creates: false,
        });

        let started = tokio::time::Instant::now();
        store
            .create_note(NoteDraft::new("Title", "Content", NoteTag::Todo))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
