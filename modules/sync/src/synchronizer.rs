//! Drives the note store on behalf of the editor.
//!
//! Local state changes first, then the store is called, then the response is
//! merged back through [`NoteCache`]. Nothing is retried and nothing is rolled
//! back: after a failed call the editor keeps showing its local state until a
//! later call succeeds.

use minimd_types::{DEFAULT_TITLE, Note, NoteId, NoteRequest, UpdatedNote};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::api::NoteApi;
use crate::cache::{MergeOutcome, NoteCache, NoteEdit, PendingSave};
use crate::error::SyncResult;

#[derive(Clone)]
pub struct Synchronizer {
    api: Arc<dyn NoteApi>,
    cache: Arc<Mutex<NoteCache>>,
}

impl Synchronizer {
    pub fn new(api: Arc<dyn NoteApi>) -> Self {
        Self {
            api,
            cache: Arc::new(Mutex::new(NoteCache::new())),
        }
    }

    /// The sidebar list, most recently updated first.
    pub fn notes(&self) -> Vec<Note> {
        self.cache.lock().notes()
    }

    /// The note open in the editor, with any unsaved local edits.
    pub fn current_note(&self) -> Option<Note> {
        self.cache.lock().current().cloned()
    }

    /// Reload the list from the store. Returns how many notes are listed.
    /// Local changes made while the call is in flight are kept.
    pub async fn refresh(&self) -> SyncResult<usize> {
        let since = self.cache.lock().revision();
        let listed = self.api.list().await?;
        let mut cache = self.cache.lock();
        cache.replace_all(listed, since);
        log::debug!("[SYNC] Refreshed {} notes", cache.len());
        Ok(cache.len())
    }

    pub fn select(&self, id: NoteId) -> Option<Note> {
        self.cache.lock().select(id).cloned()
    }

    pub fn deselect(&self) {
        self.cache.lock().deselect();
    }

    /// Create a blank note in the store, then list and open it.
    /// On failure local state is untouched.
    pub async fn create(&self) -> SyncResult<Note> {
        let request = NoteRequest::new(DEFAULT_TITLE, "");
        let note = match self.api.create(&request).await {
            Ok(note) => note,
            Err(e) => {
                log::warn!("[SYNC] Failed to create note: {}", e);
                return Err(e);
            }
        };

        log::info!("[SYNC] Created note {}", note.id);
        self.cache.lock().insert_created(note.clone());
        Ok(note)
    }

    /// Change the open note right away. The returned save still has to be
    /// sent with [`Synchronizer::save`].
    pub fn apply_edit(&self, edit: NoteEdit) -> Option<PendingSave> {
        self.cache.lock().apply_edit(edit)
    }

    /// Send a full-record update. The list entry is left alone; pass the
    /// result to [`Synchronizer::merge_saved`] to refresh it. A `NotFound`
    /// answer removes the note locally.
    pub async fn save(&self, pending: PendingSave) -> SyncResult<UpdatedNote> {
        match self.api.update(pending.id, &pending.request).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                if e.is_not_found() {
                    log::info!("[SYNC] Note {} is gone from the store, dropping it", pending.id);
                    self.cache.lock().remove(pending.id);
                } else {
                    log::warn!("[SYNC] Failed to save note {}: {}", pending.id, e);
                }
                Err(e)
            }
        }
    }

    /// Replace the list entry with a save result unless it is stale.
    pub fn merge_saved(&self, saved: &UpdatedNote) -> MergeOutcome {
        self.cache.lock().merge_saved(saved)
    }

    /// Apply an edit and save it in the background, merging the result when
    /// it arrives. Must be called from within a tokio runtime.
    pub fn edit(&self, edit: NoteEdit) -> Option<JoinHandle<()>> {
        let pending = self.apply_edit(edit)?;
        let sync = self.clone();

        Some(tokio::spawn(async move {
            if let Ok(saved) = sync.save(pending).await {
                if sync.merge_saved(&saved) == MergeOutcome::Stale {
                    log::debug!("[SYNC] Newer save for note {} already merged", saved.id);
                }
            }
        }))
    }

    /// Remove a note locally, then delete it in the store. The local removal
    /// is permanent, even if the store call fails.
    pub async fn delete(&self, id: NoteId) -> SyncResult<()> {
        self.cache.lock().remove(id);

        match self.api.delete(id).await {
            Ok(()) => {
                log::info!("[SYNC] Deleted note {}", id);
                Ok(())
            }
            Err(e) => {
                log::warn!("[SYNC] Failed to delete note {}: {}", id, e);
                Err(e)
            }
        }
    }

    /// Fetch one note and merge it. A note the store no longer has is removed.
    pub async fn reload(&self, id: NoteId) -> SyncResult<MergeOutcome> {
        match self.api.get(id).await {
            Ok(note) => Ok(self.cache.lock().merge_fetched(note)),
            Err(e) => {
                if e.is_not_found() {
                    self.cache.lock().remove(id);
                }
                Err(e)
            }
        }
    }
}
