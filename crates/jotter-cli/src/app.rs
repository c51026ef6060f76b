//! Process-wide context shared by every command
//!
//! One note store and one notes cache live for the whole process; every form
//! mounted from here reconciles against that same cache.

use std::sync::Arc;

use jotter_config::JotterConfig;
use jotter_core::{
    CacheKey, CacheRead, CacheReconciler, FormController, FormHost, InMemoryNoteStore, Note,
    NoteStore, NotesCache, StoreResult, SubmissionCoordinator, Validator,
};

pub struct App {
    config: JotterConfig,
    store: Arc<InMemoryNoteStore>,
    cache: Arc<NotesCache>,
}

impl App {
    pub fn new(config: JotterConfig) -> Self {
        let store = Arc::new(InMemoryNoteStore::from_config(&config.store));
        let cache = Arc::new(NotesCache::new(config.cache.stale_after()));
        Self {
            config,
            store,
            cache,
        }
    }

    pub fn config(&self) -> &JotterConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<InMemoryNoteStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<NotesCache> {
        &self.cache
    }

    /// Root key of the notes collection
    pub fn notes_key(&self) -> CacheKey {
        CacheKey::new(self.config.cache.notes_key.iter().cloned())
    }

    /// Mount a fresh form wired to the shared store and cache
    pub fn mount_form(&self, host: Arc<dyn FormHost>) -> FormController {
        let reconciler = CacheReconciler::new(self.cache.clone(), self.notes_key());
        let coordinator = SubmissionCoordinator::new(self.store.clone(), reconciler);

        FormController::new(coordinator, host)
            .with_validator(Validator::from_config(&self.config.validation))
            .with_config(self.config.form.clone())
    }

    /// Read the notes list through the cache
    pub async fn list_notes(&self, search: Option<&str>) -> StoreResult<(Vec<Note>, CacheRead)> {
        let key = match search {
            Some(term) => self.notes_key().with(term),
            None => self.notes_key(),
        };

        let store = self.store.clone();
        self.cache
            .read(&key, || async move { store.list_notes(search).await })
            .await
    }
}
