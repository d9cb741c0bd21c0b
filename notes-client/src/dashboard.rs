//! Dashboard — owner of the note snapshot, the edit form and the search box.
//!
//! Constructed on mount (which performs the first refresh) and torn down on
//! unmount or drop; teardown stops further refreshes and fires the child
//! tokens handed to public views. Every successful mutation invalidates the snapshot and
//! reloads the full list; nothing is patched locally.

use crate::api::NotesApi;
use crate::error::NoteError;
use crate::session::EditSession;
use crate::sharing::{self, Clipboard};
use crate::store::{NoteStore, RefreshOutcome};
use notes_types::{Note, NoteId};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Dashboard {
    api: Arc<dyn NotesApi>,
    origin: String,
    store: NoteStore,
    session: EditSession,
    search: String,
    /// Most recent failure, kept until the next successful operation
    last_error: Option<NoteError>,
    teardown: CancellationToken,
}

impl Dashboard {
    /// An unmounted dashboard with an empty snapshot
    pub fn new(api: Arc<dyn NotesApi>, origin: &str) -> Self {
        Self {
            api,
            origin: origin.trim_end_matches('/').to_string(),
            store: NoteStore::new(),
            session: EditSession::new(),
            search: String::new(),
            last_error: None,
            teardown: CancellationToken::new(),
        }
    }

    /// Construct and load. A failed first load is recorded, not fatal.
    pub async fn mount(api: Arc<dyn NotesApi>, origin: &str) -> Self {
        let mut dashboard = Self::new(api, origin);
        if let Err(e) = dashboard.refresh().await {
            log::warn!("[NOTES] Initial load failed: {}", e);
        }
        dashboard
    }

    /// Skip every later refresh and cancel views holding a child token
    pub fn unmount(&self) {
        self.teardown.cancel();
    }

    pub fn is_unmounted(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Token that fires on unmount, for views spawned from the dashboard
    pub fn cancellation_token(&self) -> CancellationToken {
        self.teardown.child_token()
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn last_error(&self) -> Option<&NoteError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// The snapshot filtered by the current search, recomputed on every call
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.store.search(&self.search).collect()
    }

    /// Outcome of a refresh or mutation: success clears the surfaced error
    fn record<T>(&mut self, result: Result<T, NoteError>) -> Result<T, NoteError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.clone()),
        }
        result
    }

    /// Outcome of a local action: only a failure touches the surfaced error
    fn record_failure<T>(&mut self, result: Result<T, NoteError>) -> Result<T, NoteError> {
        if let Err(e) = &result {
            self.last_error = Some(e.clone());
        }
        result
    }

    pub async fn refresh(&mut self) -> Result<RefreshOutcome, NoteError> {
        if self.is_unmounted() {
            return Ok(RefreshOutcome::Stale);
        }

        let api = self.api.clone();
        let ticket = self.store.begin_refresh();
        let result = api.list_notes().await;

        match self.store.complete_refresh(ticket, result) {
            Ok(RefreshOutcome::Stale) => Ok(RefreshOutcome::Stale),
            outcome => self.record(outcome),
        }
    }

    /// Invalidate and reload. A reload failure stays on the store and in
    /// `last_error` but does not undo the mutation that triggered it.
    async fn reload_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            log::warn!("[NOTES] Reload after mutation failed: {}", e);
        }
    }

    pub fn begin_create(&mut self) {
        self.session.begin_create();
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Load the note with `id` from the current snapshot into the form
    pub fn begin_edit(&mut self, id: &NoteId) -> Result<(), NoteError> {
        let note = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| NoteError::NotFound(id.to_string()));
        let note = self.record_failure(note)?;
        self.session.begin_edit(&note);
        Ok(())
    }

    /// Save the form (create or update) and reload on success
    pub async fn submit(&mut self) -> Result<Note, NoteError> {
        let api = self.api.clone();
        let result = self.session.submit(api.as_ref()).await;
        let saved = self.record(result)?;
        self.reload_after_mutation().await;
        Ok(saved)
    }

    pub async fn delete(&mut self, id: &NoteId) -> Result<(), NoteError> {
        let result = self.api.delete_note(id).await;
        self.record(result)?;
        log::info!("[NOTES] Deleted note {}", id);
        self.reload_after_mutation().await;
        Ok(())
    }

    pub fn share_link(&self, id: &NoteId) -> String {
        sharing::build_public_link(&self.origin, id)
    }

    pub fn copy_share_link(
        &mut self,
        id: &NoteId,
        clipboard: &dyn Clipboard,
    ) -> Result<String, NoteError> {
        let result = sharing::copy_public_link(clipboard, &self.origin, id);
        self.record_failure(result)
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}
