//! Remote notes service seam.
//!
//! Everything above this module talks to `dyn NotesApi`; `HttpNotesApi`
//! is the production implementation.

mod http;

pub use http::HttpNotesApi;

use crate::error::NoteError;
use async_trait::async_trait;
use notes_types::{Note, NoteId, NoteInput};

#[async_trait]
pub trait NotesApi: Send + Sync {
    /// GET /notes/
    async fn list_notes(&self) -> Result<Vec<Note>, NoteError>;

    /// POST /notes/ — returns the note with its server-assigned id
    async fn create_note(&self, input: &NoteInput) -> Result<Note, NoteError>;

    /// PUT /notes/{id}
    async fn update_note(&self, id: &NoteId, input: &NoteInput) -> Result<Note, NoteError>;

    /// DELETE /notes/{id}
    async fn delete_note(&self, id: &NoteId) -> Result<(), NoteError>;

    /// GET /notes/public/{id}
    async fn public_note(&self, id: &NoteId) -> Result<Note, NoteError>;
}
