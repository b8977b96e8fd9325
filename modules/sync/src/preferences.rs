//! Editor display preferences, persisted as a small JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;

use crate::error::PreferencesError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub vim_mode: bool,
}

pub struct PreferencesStore {
    path: PathBuf,
    tx: watch::Sender<Preferences>,
}

impl PreferencesStore {
    /// Load preferences from `path`. A missing or unreadable file yields the
    /// defaults; the file is only written on the first change.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let prefs = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Preferences>(&raw) {
                Ok(prefs) => prefs,
                Err(e) => {
                    log::warn!("[PREFS] Ignoring unreadable {}: {}", path.display(), e);
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => {
                log::warn!("[PREFS] Failed to read {}: {}", path.display(), e);
                Preferences::default()
            }
        };

        let (tx, _rx) = watch::channel(prefs);
        Self { path, tx }
    }

    pub fn get(&self) -> Preferences {
        *self.tx.borrow()
    }

    /// Persist `prefs` and notify subscribers if anything changed.
    pub fn set(&self, prefs: Preferences) -> Result<(), PreferencesError> {
        if self.get() == prefs {
            return Ok(());
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        log::debug!("[PREFS] Saved {:?}", prefs);

        self.tx.send_if_modified(|current| {
            let changed = *current != prefs;
            *current = prefs;
            changed
        });
        Ok(())
    }

    pub fn update(&self, f: impl FnOnce(&mut Preferences)) -> Result<Preferences, PreferencesError> {
        let mut prefs = self.get();
        f(&mut prefs);
        self.set(prefs)?;
        Ok(prefs)
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }
}
