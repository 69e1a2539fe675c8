//! File-backed key-value preferences.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::PortError;
use crate::ports::{FileSystem, KeyValueStore};

/// File name of the preferences document inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.yaml";

/// String preferences stored as a flat YAML map.
///
/// Every call reads the file; there is no cached copy.
pub struct FilePreferences {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl FilePreferences {
    /// Creates preferences stored at `path`.
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PortError> {
        if !self.fs.exists(&self.path) {
            return Ok(BTreeMap::new());
        }
        let raw = self.fs.read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_yaml::from_str(&raw).map_err(|e| {
            format!("Failed to parse preferences {}: {e}", self.path.display()).into()
        })
    }
}

impl KeyValueStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        let yaml = serde_yaml::to_string(&values)?;
        self.fs.write(&self.path, &yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    #[test]
    fn missing_key_reads_as_none() {
        let prefs = FilePreferences::new(Arc::new(MemoryFileSystem::new()), Path::new("/p.yaml"));
        assert_eq!(prefs.get("last_backup_date").unwrap(), None);
    }

    #[test]
    fn set_then_get_survives_a_new_handle() {
        let fs: Arc<dyn FileSystem> = Arc::new(MemoryFileSystem::new());
        let path = Path::new("/home/preferences.yaml");
        FilePreferences::new(Arc::clone(&fs), path).set("last_backup_date", "2024-05-01").unwrap();
        FilePreferences::new(Arc::clone(&fs), path).set("other", "x").unwrap();

        let prefs = FilePreferences::new(fs, path);
        assert_eq!(prefs.get("last_backup_date").unwrap().as_deref(), Some("2024-05-01"));
        assert_eq!(prefs.get("other").unwrap().as_deref(), Some("x"));
    }
}
