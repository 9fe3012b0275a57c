//! File-backed action store: one JSON file, written wholesale.

use std::{fs, io, path::PathBuf};

use crate::model::OfflineAction;

use super::{ActionStore, Result};

/// Stores the action list as a single JSON file.
///
/// A missing file is a valid empty store; a file that exists but does not
/// decode is an error, surfaced to the caller at load time.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the given file.
    ///
    /// Parent directories are created if they don't exist; the file itself
    /// is only written on the first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Returns the default store path: `~/.furrow/actions.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".furrow").join("actions.json"))
    }
}

impl ActionStore for FileStore {
    fn load(&self) -> Result<Vec<OfflineAction>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, actions: &[OfflineAction]) -> Result<()> {
        let json = serde_json::to_string(actions)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
