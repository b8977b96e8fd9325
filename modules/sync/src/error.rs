use minimd_types::NoteId;
use thiserror::Error;

/// Failures surfaced by the note store client.
///
/// None of these are retried. The synchronizer keeps its optimistic state
/// when they occur.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The store has no note with this id (HTTP 404).
    #[error("Note not found: {0}")]
    NotFound(NoteId),

    /// The store could not commit the write (HTTP 5xx).
    #[error("Store failed to persist: {0}")]
    Persistence(String),

    /// The store rejected the request body (HTTP 4xx other than 404).
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// No usable HTTP response: connection refused, timeout, undecodable body.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

impl SyncError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound(_))
    }
}

/// Failures loading or saving the preferences file.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
