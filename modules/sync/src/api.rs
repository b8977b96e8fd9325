//! The store operations the synchronizer depends on.

use async_trait::async_trait;
use minimd_types::{Note, NoteId, NoteRequest, UpdatedNote};

use crate::error::SyncResult;

/// Request/response access to a note store.
///
/// [`crate::NotesClient`] implements this over HTTP; tests substitute an
/// in-memory store.
#[async_trait]
pub trait NoteApi: Send + Sync {
    /// All notes, most recently updated first.
    async fn list(&self) -> SyncResult<Vec<Note>>;

    async fn get(&self, id: NoteId) -> SyncResult<Note>;

    /// Create a note; the returned record carries the store-assigned id.
    async fn create(&self, request: &NoteRequest) -> SyncResult<Note>;

    /// Replace title and content. Fails with `NotFound` for unknown ids.
    async fn update(&self, id: NoteId, request: &NoteRequest) -> SyncResult<UpdatedNote>;

    /// Delete a note. Succeeds when the note is already gone.
    async fn delete(&self, id: NoteId) -> SyncResult<()>;
}
