//! In-memory filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Filesystem held in a map, for running the stores without touching disk.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let files = self.files.lock().map_err(|e| format!("fs lock poisoned: {e}"))?;
        files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let mut files = self.files.lock().map_err(|e| format!("fs lock poisoned: {e}"))?;
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .map(|files| files.contains_key(path) || files.keys().any(|k| k.starts_with(path)))
            .unwrap_or(false)
    }
}
