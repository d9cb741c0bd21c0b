//! Reference `/notes` REST service.
//!
//! Keeps notes in memory and serves the list/create/update/delete and
//! public-read endpoints the notes client talks to. Used for local
//! development and end-to-end tests; nothing is persisted.

pub mod routes;
pub mod store;

use axum::Router;
use axum::routing::{get, put};
use routes::AppState;
use std::sync::Arc;

/// Build the service router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    let cors = tower_http::cors::CorsLayer::permissive();

    Router::new()
        .route("/notes", get(routes::list_notes).post(routes::create_note))
        .route("/notes/", get(routes::list_notes).post(routes::create_note))
        .route("/notes/public/:id", get(routes::public_note))
        .route("/notes/:id", put(routes::update_note).delete(routes::delete_note))
        .route("/status", get(routes::status))
        .with_state(state)
        .layer(cors)
}
