//! Client-side shadow of the note store.
//!
//! Holds the note list keyed by id, the order it is displayed in, and the one
//! note the user is editing. The list entries only change through explicit
//! merges of store responses; the current note is the user's working copy and
//! takes edits immediately.
//!
//! Every merge compares `updated_at`: a response stamped older than what the
//! cache already holds is dropped, whatever order responses arrive in.

use minimd_types::{Note, NoteId, NoteRequest, UpdatedNote};
use std::collections::{HashMap, HashSet};

/// A single field change made in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEdit {
    Title(String),
    Content(String),
}

/// A full-record save to send to the store after an optimistic edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub id: NoteId,
    pub request: NoteRequest,
}

/// What happened to a store response handed to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The list entry now reflects the response.
    Applied,
    /// The cache already holds a newer stamp; the response was dropped.
    Stale,
    /// No list entry has this id (deleted locally, or never loaded).
    Unknown,
}

#[derive(Debug, Default)]
pub struct NoteCache {
    entries: HashMap<NoteId, Note>,
    /// Display order: `updated_at` descending, ties keep their relative order.
    order: Vec<NoteId>,
    current: Option<Note>,
    /// Bumped on every local change to `entries`.
    revision: u64,
    /// Revision at which each entry last changed locally.
    touched: HashMap<NoteId, u64>,
    /// Ids removed locally. Store ids are never reused, so these stay hidden
    /// for the life of the cache.
    removed: HashSet<NoteId>,
}

impl NoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the list in display order.
    pub fn notes(&self) -> Vec<Note> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.entries.get(&id)
    }

    pub fn current(&self) -> Option<&Note> {
        self.current.as_ref()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Take this before issuing `List()` and hand it to
    /// [`NoteCache::replace_all`] with the response.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Load a `List()` response issued when the cache was at `since`.
    ///
    /// Removed notes stay hidden. An entry the cache holds with a newer stamp
    /// than the listing survives, and so does any entry changed locally after
    /// `since`, listed or not. If the current note ends up unlisted the editor
    /// goes back to idle.
    pub fn replace_all(&mut self, listed: Vec<Note>, since: u64) {
        let mut entries = HashMap::with_capacity(listed.len());
        let mut order = Vec::with_capacity(listed.len());

        for note in listed {
            if self.removed.contains(&note.id) || entries.contains_key(&note.id) {
                continue;
            }
            let note = match self.entries.remove(&note.id) {
                Some(local) if note.is_older_than(&local.updated_at) => local,
                _ => note,
            };
            order.push(note.id);
            entries.insert(note.id, note);
        }

        // Whatever is left was not listed; keep it only if it changed after
        // the listing was requested.
        for id in std::mem::take(&mut self.order) {
            let changed_since = self.touched.get(&id).is_some_and(|rev| *rev > since);
            if let Some(local) = self.entries.remove(&id) {
                if changed_since {
                    log::debug!("[SYNC] Keeping note {} changed after the listing was requested", id);
                    order.push(id);
                    entries.insert(id, local);
                }
            }
        }

        self.entries = entries;
        self.order = order;
        self.touched.retain(|id, _| self.entries.contains_key(id));
        self.resort();

        if let Some(current) = &self.current {
            if !self.entries.contains_key(&current.id) {
                log::info!("[SYNC] Current note {} no longer exists, closing it", current.id);
                self.current = None;
            }
        }
    }

    /// Add a note the store just created to the top of the list and open it.
    pub fn insert_created(&mut self, note: Note) {
        if self.removed.contains(&note.id) {
            return;
        }
        self.order.retain(|id| *id != note.id);
        self.order.insert(0, note.id);
        self.touch(note.id);
        self.current = Some(note.clone());
        self.entries.insert(note.id, note);
    }

    /// Open a listed note for editing. Returns the working copy.
    pub fn select(&mut self, id: NoteId) -> Option<&Note> {
        let note = self.entries.get(&id)?.clone();
        self.current = Some(note);
        self.current.as_ref()
    }

    pub fn deselect(&mut self) {
        self.current = None;
    }

    /// Apply an edit to the working copy and return the save it implies.
    /// `None` when no note is open.
    pub fn apply_edit(&mut self, edit: NoteEdit) -> Option<PendingSave> {
        let current = self.current.as_mut()?;
        match edit {
            NoteEdit::Title(title) => current.title = title,
            NoteEdit::Content(content) => current.content = content,
        }
        Some(PendingSave {
            id: current.id,
            request: NoteRequest::from(&*current),
        })
    }

    /// Replace the list entry for `saved.id` with an Update response.
    ///
    /// The working copy keeps its own title and content (they may already be
    /// ahead of this response) but adopts the newer stamp.
    pub fn merge_saved(&mut self, saved: &UpdatedNote) -> MergeOutcome {
        let Some(entry) = self.entries.get_mut(&saved.id) else {
            return MergeOutcome::Unknown;
        };
        if saved.updated_at < entry.updated_at {
            log::debug!(
                "[SYNC] Dropping stale save for note {} ({} < {})",
                saved.id,
                saved.updated_at,
                entry.updated_at
            );
            return MergeOutcome::Stale;
        }

        entry.title = saved.title.clone();
        entry.content = saved.content.clone();
        entry.updated_at = saved.updated_at;
        self.touch(saved.id);

        if let Some(current) = self.current.as_mut() {
            if current.id == saved.id && current.is_older_than(&saved.updated_at) {
                current.updated_at = saved.updated_at;
            }
        }

        self.resort();
        MergeOutcome::Applied
    }

    /// Merge a full record fetched with `Get(id)`.
    pub fn merge_fetched(&mut self, note: Note) -> MergeOutcome {
        match self.entries.get(&note.id) {
            None => MergeOutcome::Unknown,
            Some(entry) if note.is_older_than(&entry.updated_at) => MergeOutcome::Stale,
            Some(_) => {
                let saved = UpdatedNote {
                    id: note.id,
                    title: note.title.clone(),
                    content: note.content.clone(),
                    updated_at: note.updated_at,
                };
                if let Some(entry) = self.entries.get_mut(&note.id) {
                    entry.created_at = note.created_at;
                }
                self.merge_saved(&saved)
            }
        }
    }

    /// Drop a note from local state for good. Closes it if it is the current
    /// note. Later listings and merges for this id are ignored.
    pub fn remove(&mut self, id: NoteId) -> bool {
        self.removed.insert(id);
        self.touched.remove(&id);
        let removed = self.entries.remove(&id).is_some();
        self.order.retain(|entry| *entry != id);
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
        }
        removed
    }

    fn touch(&mut self, id: NoteId) {
        self.revision += 1;
        self.touched.insert(id, self.revision);
    }

    fn resort(&mut self) {
        let entries = &self.entries;
        self.order.sort_by(|a, b| {
            let a = entries.get(a).map(|n| n.updated_at);
            let b = entries.get(b).map(|n| n.updated_at);
            b.cmp(&a)
        });
    }
}
