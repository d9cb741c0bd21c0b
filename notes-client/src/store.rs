//! NoteStore — client-side snapshot of the server's note collection
//!
//! The snapshot is only ever replaced wholesale by a full re-fetch; it is
//! never patched locally after a mutation. Each refresh takes a ticket from
//! a generation counter so a response that arrives after a newer refresh
//! was started is dropped instead of overwriting fresher data.

use crate::api::NotesApi;
use crate::error::NoteError;
use notes_types::{Note, NoteId};

/// Generation a refresh was started under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot replaced with this many notes
    Applied(usize),
    /// A newer refresh was started since; the result was dropped
    Stale,
}

#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    generation: u64,
    loaded: bool,
    last_error: Option<NoteError>,
}

/// Case-insensitive substring match; an empty query matches everything
pub fn title_matches(title: &str, query: &str) -> bool {
    title.to_lowercase().contains(&query.to_lowercase())
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes in the order the service returned them
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// True once at least one refresh has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Failure of the most recent applied refresh, cleared by the next success
    pub fn last_error(&self) -> Option<&NoteError> {
        self.last_error.as_ref()
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    /// Notes whose title satisfies `predicate`. Restartable: every call walks
    /// the current snapshot from the start.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Note> + 'a
    where
        P: Fn(&str) -> bool + 'a,
    {
        self.notes.iter().filter(move |n| predicate(&n.title))
    }

    /// Title search, see [`title_matches`]
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Note> + 'a {
        self.filter(move |title| title_matches(title, query))
    }

    /// Start a refresh. Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation += 1;
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Apply the result of a fetch started with `ticket`.
    ///
    /// On failure the existing snapshot is left untouched and the error is
    /// kept as retryable state as well as returned.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Note>, NoteError>,
    ) -> Result<RefreshOutcome, NoteError> {
        if ticket.generation != self.generation {
            log::debug!(
                "[NOTES] Dropping stale refresh (generation {} < {})",
                ticket.generation,
                self.generation
            );
            return Ok(RefreshOutcome::Stale);
        }

        match result {
            Ok(notes) => {
                let count = notes.len();
                self.notes = notes;
                self.loaded = true;
                self.last_error = None;
                Ok(RefreshOutcome::Applied(count))
            }
            Err(e) => {
                log::warn!("[NOTES] Refresh failed, keeping {} cached notes: {}", self.notes.len(), e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Re-fetch the full collection and replace the snapshot
    pub async fn refresh(&mut self, api: &dyn NotesApi) -> Result<RefreshOutcome, NoteError> {
        let ticket = self.begin_refresh();
        let result = api.list_notes().await;
        self.complete_refresh(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeNotesApi, note};

    fn loaded(notes: Vec<Note>) -> NoteStore {
        let mut store = NoteStore::new();
        let ticket = store.begin_refresh();
        store.complete_refresh(ticket, Ok(notes)).unwrap();
        store
    }

    fn ids<'a>(notes: impl Iterator<Item = &'a Note>) -> Vec<&'a str> {
        notes.map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_groceries_scenario() {
        let store = loaded(vec![note("1", "Groceries", "milk")]);

        assert_eq!(ids(store.search("gro")), vec!["1"]);
        assert!(store.search("xyz").next().is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let store = loaded(vec![
            note("1", "Weekly PLAN", ""),
            note("2", "groceries", ""),
            note("3", "Planet notes", ""),
        ]);

        assert_eq!(ids(store.search("plan")), vec!["1", "3"]);
        assert_eq!(ids(store.search("ROC")), vec!["2"]);
        assert_eq!(ids(store.search("")), vec!["1", "2", "3"]);
        for n in store.notes() {
            assert_eq!(
                store.search("an").any(|m| m.id == n.id),
                title_matches(&n.title, "an")
            );
        }
    }

    #[test]
    fn test_filter_is_restartable_and_non_mutating() {
        let store = loaded(vec![note("1", "a", ""), note("2", "b", "")]);

        let first: Vec<_> = ids(store.filter(|t| t == "b"));
        let second: Vec<_> = ids(store.filter(|t| t == "b"));
        assert_eq!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let api = FakeNotesApi::with_notes(vec![note("1", "One", ""), note("2", "Two", "")]);
        let mut store = NoteStore::new();
        assert!(!store.is_loaded());

        let outcome = store.refresh(&api).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Applied(2));
        assert!(store.is_loaded());
        assert_eq!(store.get(&NoteId::from("2")).unwrap().title, "Two");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_snapshot() {
        let api = FakeNotesApi::with_notes(vec![note("1", "One", "")]);
        let mut store = NoteStore::new();
        store.refresh(&api).await.unwrap();

        api.fail_next(NoteError::Network("connection reset".into()));
        let err = store.refresh(&api).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(store.len(), 1);
        assert_eq!(store.last_error(), Some(&err));

        store.refresh(&api).await.unwrap();
        assert!(store.last_error().is_none());
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut store = NoteStore::new();
        let old = store.begin_refresh();
        let new = store.begin_refresh();

        store
            .complete_refresh(new, Ok(vec![note("2", "Fresh", "")]))
            .unwrap();
        let outcome = store
            .complete_refresh(old, Ok(vec![note("1", "Old", "")]))
            .unwrap();

        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(ids(store.notes().iter()), vec!["2"]);

        let outcome = store
            .complete_refresh(old, Err(NoteError::Network("late".into())))
            .unwrap();
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert!(store.last_error().is_none());
    }
}
