//! Note storage collaborator

mod error;
mod memory;
mod note_store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryNoteStore;
pub use note_store::NoteStore;
