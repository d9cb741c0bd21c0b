//! EditSession — the create/edit form state machine.
//!
//! Two states: `Creating` (initial) and `Editing(id)`. `begin_edit` may
//! retarget an active edit, overwriting unsaved drafts. A successful submit
//! and `cancel` both return to `Creating` with empty drafts. A failed submit
//! changes nothing so the user can retry.

use crate::api::NotesApi;
use crate::error::NoteError;
use notes_types::{Note, NoteId, NoteInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Editing(NoteId),
}

/// What a submit will send, decided purely from session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveIntent {
    Create(NoteInput),
    Update(NoteId, NoteInput),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditSession {
    editing_id: Option<NoteId>,
    draft_title: String,
    draft_content: String,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        match &self.editing_id {
            Some(id) => EditMode::Editing(id.clone()),
            None => EditMode::Creating,
        }
    }

    pub fn editing_id(&self) -> Option<&NoteId> {
        self.editing_id.as_ref()
    }

    pub fn draft_title(&self) -> &str {
        &self.draft_title
    }

    pub fn draft_content(&self) -> &str {
        &self.draft_content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft_content = content.into();
    }

    pub fn begin_create(&mut self) {
        self.editing_id = None;
        self.draft_title.clear();
        self.draft_content.clear();
    }

    /// Target `note`, replacing whatever drafts were pending
    pub fn begin_edit(&mut self, note: &Note) {
        if let Some(previous) = &self.editing_id {
            if previous != &note.id {
                log::debug!("[SESSION] Retargeting edit {} -> {}", previous, note.id);
            }
        }
        self.editing_id = Some(note.id.clone());
        self.draft_title = note.title.clone();
        self.draft_content = note.content.clone();
    }

    pub fn cancel(&mut self) {
        self.begin_create();
    }

    /// Validate the drafts and decide between create and update
    pub fn save_intent(&self) -> Result<SaveIntent, NoteError> {
        if self.draft_title.trim().is_empty() {
            return Err(NoteError::Validation("title is required".to_string()));
        }

        let input = NoteInput::new(self.draft_title.clone(), self.draft_content.clone());
        Ok(match &self.editing_id {
            Some(id) => SaveIntent::Update(id.clone(), input),
            None => SaveIntent::Create(input),
        })
    }

    /// Send the drafts. Nothing is sent when validation fails.
    pub async fn submit(&mut self, api: &dyn NotesApi) -> Result<Note, NoteError> {
        let intent = self.save_intent()?;

        let result = match &intent {
            SaveIntent::Create(input) => api.create_note(input).await,
            SaveIntent::Update(id, input) => api.update_note(id, input).await,
        };

        match result {
            Ok(note) => {
                log::info!("[SESSION] Saved note {}", note.id);
                self.begin_create();
                Ok(note)
            }
            Err(e) => {
                log::warn!("[SESSION] Save failed, keeping drafts: {}", e);
                Err(e)
            }
        }
    }
}
