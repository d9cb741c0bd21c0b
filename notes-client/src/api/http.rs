//! Typed HTTP client for the notes REST service.

use super::NotesApi;
use crate::config::Config;
use crate::error::NoteError;
use async_trait::async_trait;
use notes_types::{Note, NoteId, NoteInput};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

pub struct HttpNotesApi {
    base_url: String,
    client: Client,
}

impl HttpNotesApi {
    /// `base_url` is the collection root, e.g. `https://api.example.com/notes`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, NoteError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NoteError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id.as_str()))
    }

    /// Turn a non-2xx response into an error, mapping 404 to `NotFound`
    async fn check(resp: Response, id: Option<&NoteId>) -> Result<Response, NoteError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(NoteError::NotFound(id.to_string()));
            }
        }

        let body = resp.text().await.unwrap_or_default();
        Err(NoteError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, NoteError> {
        resp.json::<T>()
            .await
            .map_err(|e| NoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        let resp = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| NoteError::Network(format!("List notes failed: {}", e)))?;

        let notes: Vec<Note> = Self::json(Self::check(resp, None).await?).await?;
        log::debug!("[NOTES] Fetched {} notes", notes.len());
        Ok(notes)
    }

    async fn create_note(&self, input: &NoteInput) -> Result<Note, NoteError> {
        let resp = self
            .client
            .post(format!("{}/", self.base_url))
            .json(input)
            .send()
            .await
            .map_err(|e| NoteError::Network(format!("Create note failed: {}", e)))?;

        Self::json(Self::check(resp, None).await?).await
    }

    async fn update_note(&self, id: &NoteId, input: &NoteInput) -> Result<Note, NoteError> {
        let resp = self
            .client
            .put(self.note_url(id))
            .json(input)
            .send()
            .await
            .map_err(|e| NoteError::Network(format!("Update note failed: {}", e)))?;

        Self::json(Self::check(resp, Some(id)).await?).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<(), NoteError> {
        let resp = self
            .client
            .delete(self.note_url(id))
            .send()
            .await
            .map_err(|e| NoteError::Network(format!("Delete note failed: {}", e)))?;

        Self::check(resp, Some(id)).await?;
        Ok(())
    }

    async fn public_note(&self, id: &NoteId) -> Result<Note, NoteError> {
        let resp = self
            .client
            .get(format!(
                "{}/public/{}",
                self.base_url,
                urlencoding::encode(id.as_str())
            ))
            .send()
            .await
            .map_err(|e| NoteError::Network(format!("Public read failed: {}", e)))?;

        Self::json(Self::check(resp, Some(id)).await?).await
    }
}
