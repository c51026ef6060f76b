//! NoteStore abstraction
//!
//! The form only needs to create notes; the read path exists so the shared
//! notes cache has something to refetch through after an invalidation.
//! Implementations decide how notes reach the service. Transport and
//! persistence live behind this trait.

use async_trait::async_trait;

use crate::note::{Note, NoteDraft};
use crate::storage::StoreResult;

/// Remote note-storage collaborator
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a validated draft and return the server-assigned record
    ///
    /// Each call creates a new note; identical drafts are not deduplicated.
    async fn create_note(&self, draft: NoteDraft) -> StoreResult<Note>;

    /// List notes, optionally filtered by a case-insensitive search term
    /// matched against title and content
    async fn list_notes(&self, search: Option<&str>) -> StoreResult<Vec<Note>>;
}
