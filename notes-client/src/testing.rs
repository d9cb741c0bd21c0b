//! In-memory `NotesApi` for unit tests: records every call and can be told
//! to fail the next one.

use crate::api::NotesApi;
use crate::error::NoteError;
use async_trait::async_trait;
use notes_types::{Note, NoteId, NoteInput};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(NoteInput),
    Update(NoteId, NoteInput),
    Delete(NoteId),
    Public(NoteId),
}

#[derive(Default)]
pub struct FakeNotesApi {
    notes: Mutex<Vec<Note>>,
    calls: Mutex<Vec<ApiCall>>,
    fail_next: Mutex<Option<NoteError>>,
    fail_list: Mutex<Option<NoteError>>,
    next_id: Mutex<u64>,
}

impl FakeNotesApi {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let next_id = notes.len() as u64 + 1;
        Self {
            notes: Mutex::new(notes),
            next_id: Mutex::new(next_id),
            ..Default::default()
        }
    }

    pub fn fail_next(&self, err: NoteError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Fail the next list call only, letting mutations before it through
    pub fn fail_next_list(&self, err: NoteError) {
        *self.fail_list.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), NoteError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn note(id: &str, title: &str, content: &str) -> Note {
    Note {
        id: NoteId::from(id),
        title: title.to_string(),
        content: content.to_string(),
    }
}

#[async_trait]
impl NotesApi for FakeNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        self.record(ApiCall::List)?;
        if let Some(err) = self.fail_list.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.notes())
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note, NoteError> {
        self.record(ApiCall::Create(input.clone()))?;
        let mut next_id = self.next_id.lock().unwrap();
        let created = note(&next_id.to_string(), &input.title, &input.content);
        *next_id += 1;
        self.notes.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_note(&self, id: &NoteId, input: &NoteInput) -> Result<Note, NoteError> {
        self.record(ApiCall::Update(id.clone(), input.clone()))?;
        let mut notes = self.notes.lock().unwrap();
        let existing = notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
        existing.title = input.title.clone();
        existing.content = input.content.clone();
        Ok(existing.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<(), NoteError> {
        self.record(ApiCall::Delete(id.clone()))?;
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        if notes.len() == before {
            return Err(NoteError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn public_note(&self, id: &NoteId) -> Result<Note, NoteError> {
        self.record(ApiCall::Public(id.clone()))?;
        self.notes()
            .into_iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }
}
