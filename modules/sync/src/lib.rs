//! Client side of minimd: a typed store client and the synchronizer that
//! keeps the editor's note list in step with it.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod preferences;
pub mod synchronizer;

pub use api::NoteApi;
pub use cache::{MergeOutcome, NoteCache, NoteEdit, PendingSave};
pub use client::NotesClient;
pub use config::ClientConfig;
pub use error::{PreferencesError, SyncError, SyncResult};
pub use preferences::{Preferences, PreferencesStore};
pub use synchronizer::Synchronizer;

pub use minimd_types as types;
