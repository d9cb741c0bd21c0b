//! In-memory note collection backing the reference service.

use notes_types::{Note, NoteId, NoteInput};
use tokio::sync::RwLock;

/// Notes kept in insertion order, which is also the order `list` returns.
#[derive(Default)]
pub struct NoteCollection {
    notes: RwLock<Vec<Note>>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of notes (ids are kept as given)
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: RwLock::new(notes),
        }
    }

    pub async fn list(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn get(&self, id: &NoteId) -> Option<Note> {
        self.notes.read().await.iter().find(|n| &n.id == id).cloned()
    }

    /// Append a note under a freshly generated id
    pub async fn create(&self, input: NoteInput) -> Note {
        let note = Note {
            id: NoteId::new(uuid::Uuid::new_v4().to_string()),
            title: input.title,
            content: input.content,
        };
        self.notes.write().await.push(note.clone());
        note
    }

    /// Replace title and content in place. The id never changes.
    pub async fn update(&self, id: &NoteId, input: NoteInput) -> Option<Note> {
        let mut notes = self.notes.write().await;
        let note = notes.iter_mut().find(|n| &n.id == id)?;
        note.title = input.title;
        note.content = input.content;
        Some(note.clone())
    }

    /// Returns false when no note had that id
    pub async fn delete(&self, id: &NoteId) -> bool {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| &n.id != id);
        notes.len() != before
    }
}
