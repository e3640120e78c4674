//! Where containers come from and go to.
//!
//! The codec only talks to a [`FileStore`]; [`FsStore`] is the filesystem
//! implementation and [`MemoryStore`] keeps everything in a map.

use crate::error::{Result, StoreError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Load and save whole byte sequences by path.
pub trait FileStore {
    /// # Errors
    /// `StoreError::NotFound` if nothing exists at `path`.
    fn load(&self, path: &Path) -> Result<Vec<u8>>;

    /// # Errors
    /// `StoreError::Write` if the bytes could not be stored.
    fn save(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Reads and writes real files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FileStore for FsStore {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| {
            let path = path.to_path_buf();
            match source.kind() {
                ErrorKind::NotFound => StoreError::NotFound { path },
                _ => StoreError::Read { path, source },
            }
            .into()
        })
    }

    fn save(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        std::fs::write(path, bytes).map_err(|source| {
            StoreError::Write {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }
}

/// In-memory store, safe to share between threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        // A poisoned map is still a valid map.
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        self.lock().get(path).cloned().ok_or_else(|| {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
            .into()
        })
    }

    fn save(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.lock().insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
