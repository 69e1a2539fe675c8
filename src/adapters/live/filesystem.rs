//! Live filesystem adapter using `std::fs`.
//!
//! Writes go to a sibling `.tmp` file that is renamed over the target, so a
//! crash mid-commit leaves the previous document intact.

use std::path::Path;

use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let staging = path.with_extension("tmp");
        std::fs::write(&staging, contents)?;
        std::fs::rename(&staging, path)?;
        tracing::trace!(path = %path.display(), bytes = contents.len(), "committed");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tables.json");

        LiveFileSystem.write(&path, "{}").unwrap();

        assert!(LiveFileSystem.exists(&path));
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn overwrite_replaces_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        LiveFileSystem.write(&path, r#"{"a":"1"}"#).unwrap();
        LiveFileSystem.write(&path, r#"{"a":"2"}"#).unwrap();

        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), r#"{"a":"2"}"#);
        assert!(!dir.path().join("prefs.tmp").exists());
    }

    #[test]
    fn reading_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.read_to_string(&dir.path().join("absent")).is_err());
    }
}
