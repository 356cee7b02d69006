//! Persisted user preferences.

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FILE_NAME: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("No home directory to store preferences in")]
    NoConfigDir,
    #[error("Failed to write preferences: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub sidebar_collapsed: bool,
}

impl Preferences {
    /// `<config dir>/preferences.json` for this application.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "bizdash", "bizdash").map(|dirs| dirs.config_dir().join(FILE_NAME))
    }

    /// Read preferences, falling back to defaults when the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!("Could not read preferences {}: {}", path.display(), e);
                return Self::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Preferences bound to a file; `None` path keeps them in memory only.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: Option<PathBuf>,
    prefs: Preferences,
}

impl PrefsStore {
    pub fn open(path: Option<PathBuf>) -> Self {
        let prefs = path.as_deref().map(Preferences::load).unwrap_or_default();
        Self { path, prefs }
    }

    pub fn open_default() -> Self {
        Self::open(Preferences::default_path())
    }

    pub fn get(&self) -> Preferences {
        self.prefs
    }

    /// Update and write through. The in-memory value changes even if the write fails.
    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<(), PrefsError> {
        self.prefs.sidebar_collapsed = collapsed;
        match &self.path {
            Some(path) => self.prefs.save(path),
            None => Err(PrefsError::NoConfigDir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::load(&dir.path().join("nope.json"));
        assert_eq!(prefs, Preferences::default());
        assert!(!prefs.sidebar_collapsed);
    }

    #[test]
    fn save_creates_directories_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join(FILE_NAME);
        Preferences {
            sidebar_collapsed: true,
        }
        .save(&path)
        .unwrap();

        assert!(path.exists());
        assert!(Preferences::load(&path).sidebar_collapsed);
    }

    #[test]
    fn corrupt_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Preferences::load(&path), Preferences::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, r#"{"sidebar_collapsed": true, "theme": "dark"}"#).unwrap();
        assert!(Preferences::load(&path).sidebar_collapsed);
    }

    #[test]
    fn store_writes_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        let mut store = PrefsStore::open(Some(path.clone()));
        assert!(!store.get().sidebar_collapsed);

        store.set_sidebar_collapsed(true).unwrap();
        assert!(PrefsStore::open(Some(path)).get().sidebar_collapsed);
    }

    #[test]
    fn memory_only_store_keeps_value() {
        let mut store = PrefsStore::open(None);
        assert!(matches!(
            store.set_sidebar_collapsed(true),
            Err(PrefsError::NoConfigDir)
        ));
        assert!(store.get().sidebar_collapsed);
    }
}
