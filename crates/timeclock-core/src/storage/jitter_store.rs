//! JSON-file jitter store holding the single current `DailyJitter`.

use std::path::{Path, PathBuf};

use super::{data_dir, JitterStore};
use crate::error::StorageError;
use crate::jitter::DailyJitter;

#[derive(Debug, Clone)]
pub struct FileJitterStore {
    path: PathBuf,
}

impl FileJitterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `<data_dir>/jitter.json`.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(data_dir()?.join("jitter.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JitterStore for FileJitterStore {
    fn load(&self) -> Result<Option<DailyJitter>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| StorageError::Malformed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&mut self, jitter: &DailyJitter) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(jitter).map_err(|e| StorageError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}
