//! Shared wire types for the Minimd note store and its clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned note identity. Never reused once a note is deleted.
pub type NoteId = i64;

/// Title given to notes created from the editor's "new note" action.
pub const DEFAULT_TITLE: &str = "New Note";

// =====================================================
// Domain Types
// =====================================================

/// A titled markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Markdown source
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// True when `other` carries a strictly newer stamp than this note.
    pub fn is_older_than(&self, other: &DateTime<Utc>) -> bool {
        self.updated_at < *other
    }
}

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/notes` and `PUT /api/notes/{id}`. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
}

impl NoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<&Note> for NoteRequest {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }
}

// =====================================================
// Response Types
// =====================================================

/// The fields every `PUT /api/notes/{id}` response is guaranteed to carry.
///
/// Stores may return the full [`Note`]; extra fields are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedNote {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for UpdatedNote {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            updated_at: note.updated_at,
        }
    }
}

/// JSON body of every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}
