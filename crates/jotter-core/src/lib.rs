//! Note-creation form lifecycle
//!
//! Leaves first:
//!
//! - [`validation`]: pure rule-table validation of raw form values
//! - [`storage`]: the [`NoteStore`] collaborator and an in-memory store
//! - [`cache`] and [`reconciler`]: the shared notes cache and the
//!   invalidate-after-write contract
//! - [`submission`]: the one-at-a-time create state machine
//! - [`form`]: the controller the presentation layer drives

pub mod cache;
pub mod form;
pub mod note;
pub mod reconciler;
pub mod storage;
pub mod submission;
pub mod test_support;
pub mod validation;

pub use cache::{CacheInvalidator, CacheKey, CacheRead, NotesCache};
pub use form::{FormController, FormHost, FormPhase, FormView, SubmitOutcome};
pub use note::{Field, FieldParseError, FormValues, Note, NoteDraft, NoteTag, TagParseError};
pub use reconciler::CacheReconciler;
pub use storage::{InMemoryNoteStore, NoteStore, StoreError, StoreResult};
pub use submission::{
    SubmissionCoordinator, SubmissionEvent, SubmissionState, SUBMISSION_ERROR_MESSAGE,
};
pub use validation::{validate, FieldErrors, Rule, ValidationResult, Validator};
