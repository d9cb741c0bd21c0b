//! Notes client — keeps a local snapshot of a remote `/notes` collection in
//! sync, drives the create/edit form, and builds public share links.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod public_view;
pub mod session;
pub mod sharing;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::{HttpNotesApi, NotesApi};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::NoteError;
pub use notes_types::{Note, NoteId, NoteInput};
pub use public_view::{PublicNoteView, PublicViewState};
pub use session::{EditMode, EditSession, SaveIntent};
pub use store::{NoteStore, RefreshOutcome, RefreshTicket};
