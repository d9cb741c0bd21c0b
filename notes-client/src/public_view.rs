//! Read-only view of a single shared note.
//!
//! One read against the public endpoint, no retry, no polling. Any failure
//! lands in `NotFound`; the underlying cause only goes to the log.

use crate::api::NotesApi;
use notes_types::{Note, NoteId};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicViewState {
    Loading,
    Loaded(Note),
    NotFound,
}

#[derive(Debug)]
pub struct PublicNoteView {
    id: NoteId,
    state: PublicViewState,
}

impl PublicNoteView {
    pub fn new(id: NoteId) -> Self {
        Self {
            id,
            state: PublicViewState::Loading,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn state(&self) -> &PublicViewState {
        &self.state
    }

    /// Perform the read. Once the view has left `Loading` this is a no-op.
    /// If `cancel` fires first the response is dropped and the view stays
    /// in `Loading`.
    pub async fn load(&mut self, api: &dyn NotesApi, cancel: &CancellationToken) -> &PublicViewState {
        if self.state != PublicViewState::Loading {
            return &self.state;
        }

        let id = self.id.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            r = api.public_note(&id) => Some(r),
        };

        let Some(result) = result else {
            log::debug!("[PUBLIC] Load of note {} cancelled", self.id);
            return &self.state;
        };

        self.state = match result {
            Ok(note) => PublicViewState::Loaded(note),
            Err(e) => {
                log::warn!("[PUBLIC] Note {} unavailable: {}", self.id, e);
                PublicViewState::NotFound
            }
        };
        &self.state
    }
}
