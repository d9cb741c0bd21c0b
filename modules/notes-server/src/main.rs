//! Notes reference service.
//!
//! Default: http://127.0.0.1:9110/notes/

use notes_server::routes::AppState;
use notes_server::store::NoteCollection;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let port: u16 = std::env::var("NOTES_SERVER_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9110);

    let host = std::env::var("NOTES_SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let state = Arc::new(AppState::new(NoteCollection::new()));
    let app = notes_server::router(state);

    let addr = format!("{}:{}", host, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!("Notes service listening on http://{}/notes/", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
