//! Axum route handlers for the `/notes` REST API.

use crate::store::NoteCollection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use notes_types::{NoteId, NoteInput};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct AppState {
    pub notes: NoteCollection,
    pub start_time: Instant,
    pub mutation_count: AtomicU64,
}

impl AppState {
    pub fn new(notes: NoteCollection) -> Self {
        Self {
            notes,
            start_time: Instant::now(),
            mutation_count: AtomicU64::new(0),
        }
    }
}

/// Service health status
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub note_count: usize,
    pub total_mutations: u64,
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": msg.into() }))).into_response()
}

fn validate(input: &NoteInput) -> Result<(), Response> {
    if input.title.trim().is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "title is required"));
    }
    Ok(())
}

// GET /notes/
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Response {
    let notes = state.notes.list().await;
    log::debug!("[NOTES-SERVER] list -> {} notes", notes.len());
    (StatusCode::OK, Json(notes)).into_response()
}

// POST /notes/
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NoteInput>,
) -> Response {
    if let Err(resp) = validate(&input) {
        return resp;
    }

    let note = state.notes.create(input).await;
    state.mutation_count.fetch_add(1, Ordering::Relaxed);
    log::info!("[NOTES-SERVER] created note {}", note.id);

    (StatusCode::CREATED, Json(note)).into_response()
}

// PUT /notes/:id
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<NoteInput>,
) -> Response {
    if let Err(resp) = validate(&input) {
        return resp;
    }

    let id = NoteId::from(id);
    match state.notes.update(&id, input).await {
        Some(note) => {
            state.mutation_count.fetch_add(1, Ordering::Relaxed);
            log::info!("[NOTES-SERVER] updated note {}", id);
            (StatusCode::OK, Json(note)).into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, format!("note {} not found", id)),
    }
}

// DELETE /notes/:id
pub async fn delete_note(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let id = NoteId::from(id);
    if state.notes.delete(&id).await {
        state.mutation_count.fetch_add(1, Ordering::Relaxed);
        log::info!("[NOTES-SERVER] deleted note {}", id);
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, format!("note {} not found", id))
    }
}

// GET /notes/public/:id
pub async fn public_note(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let id = NoteId::from(id);
    match state.notes.get(&id).await {
        Some(note) => (StatusCode::OK, Json(note)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Note not found"),
    }
}

// GET /status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        note_count: state.notes.len().await,
        total_mutations: state.mutation_count.load(Ordering::Relaxed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use notes_types::Note;
    use tower::ServiceExt;

    fn seeded_state() -> Arc<AppState> {
        Arc::new(AppState::new(NoteCollection::with_notes(vec![Note {
            id: NoteId::from("1"),
            title: "Groceries".to_string(),
            content: "milk".to_string(),
        }])))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_seeded_notes() {
        let app = router(seeded_state());
        let resp = app
            .oneshot(Request::get("/notes/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json[0]["title"], "Groceries");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let app = router(seeded_state());
        let resp = app
            .oneshot(json_request(
                "POST",
                "/notes/",
                serde_json::json!({"title": "  ", "content": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_note_is_404() {
        let app = router(seeded_state());
        let resp = app
            .oneshot(json_request(
                "PUT",
                "/notes/999",
                serde_json::json!({"title": "T", "content": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_public_read_and_delete() {
        let state = seeded_state();

        let resp = router(state.clone())
            .oneshot(Request::get("/notes/public/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["content"], "milk");

        let resp = router(state.clone())
            .oneshot(Request::delete("/notes/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = router(state.clone())
            .oneshot(Request::get("/notes/public/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.mutation_count.load(Ordering::Relaxed), 1);
    }
}
