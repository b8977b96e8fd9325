//! Typed HTTP client for the note store API.

use async_trait::async_trait;
use minimd_types::{ErrorBody, Note, NoteId, NoteRequest, UpdatedNote};
use reqwest::{Response, StatusCode};

use crate::api::NoteApi;
use crate::config::ClientConfig;
use crate::error::{SyncError, SyncResult};

pub struct NotesClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesClient {
    pub fn new(config: &ClientConfig) -> SyncResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/api/notes/{}", self.base_url, id)
    }

    /// Pass 2xx responses through; turn everything else into a [`SyncError`].
    async fn check(resp: Response, id: Option<NoteId>) -> SyncResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => SyncError::NotFound(id),
            (s, _) if s.is_client_error() && s != StatusCode::NOT_FOUND => {
                SyncError::MalformedRequest(message)
            }
            (s, _) => SyncError::Persistence(format!("HTTP {}: {}", s, message)),
        })
    }
}

#[async_trait]
impl NoteApi for NotesClient {
    async fn list(&self) -> SyncResult<Vec<Note>> {
        let resp = self.client.get(self.notes_url()).send().await?;
        let resp = Self::check(resp, None).await?;
        Ok(resp.json::<Vec<Note>>().await?)
    }

    async fn get(&self, id: NoteId) -> SyncResult<Note> {
        let resp = self.client.get(self.note_url(id)).send().await?;
        let resp = Self::check(resp, Some(id)).await?;
        Ok(resp.json::<Note>().await?)
    }

    async fn create(&self, request: &NoteRequest) -> SyncResult<Note> {
        let resp = self.client.post(self.notes_url()).json(request).send().await?;
        let resp = Self::check(resp, None).await?;
        Ok(resp.json::<Note>().await?)
    }

    async fn update(&self, id: NoteId, request: &NoteRequest) -> SyncResult<UpdatedNote> {
        let resp = self.client.put(self.note_url(id)).json(request).send().await?;
        let resp = Self::check(resp, Some(id)).await?;
        Ok(resp.json::<UpdatedNote>().await?)
    }

    async fn delete(&self, id: NoteId) -> SyncResult<()> {
        let resp = self.client.delete(self.note_url(id)).send().await?;
        match Self::check(resp, Some(id)).await {
            Ok(_) => Ok(()),
            // Already gone is the same end state.
            Err(SyncError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
