use thiserror::Error;

/// Everything that can go wrong talking to the notes service or the platform.
///
/// `Clone` so the dashboard can keep the last failure around as state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    /// The request never completed (connect failure, timeout, reset)
    #[error("network failure: {0}")]
    Network(String),

    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Caught before anything was sent
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("note {0} not found")]
    NotFound(String),

    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
}

impl NoteError {
    /// Whether repeating the same call could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            NoteError::Network(_) => true,
            NoteError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
