//! Error types shared across the crate.

use thiserror::Error;

/// Boxed error returned by port trait methods.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from the persistence collaborator.
///
/// Storage failures are always propagated to the caller: a lost write must
/// be visible.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store failed to read or write.
    #[error("storage I/O failed: {0}")]
    Io(String),

    /// The persisted document could not be decoded.
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),

    /// An update referenced a record that does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind (`task` or `completion`).
        kind: &'static str,
        /// Identity that was looked up.
        id: i64,
    },
}

impl StorageError {
    /// Recovers a storage error raised behind a port, or wraps a foreign one.
    #[must_use]
    pub fn from_port(err: PortError) -> Self {
        match err.downcast::<Self>() {
            Ok(storage) => *storage,
            Err(other) => Self::Io(other.to_string()),
        }
    }
}

/// Input rejected at the boundary before it reaches the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Task name is empty or whitespace.
    #[error("task name must not be blank")]
    BlankName,

    /// No weekday was selected.
    #[error("select at least one day")]
    NoDays,

    /// Target must be a positive integer.
    #[error("target value must be greater than zero")]
    NonPositiveTarget,
}

/// Failures of the daily backup. Never surfaced to the core.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Reading the tables for the snapshot failed.
    #[error("could not read data for backup: {0}")]
    Storage(#[from] StorageError),

    /// The snapshot could not be serialized.
    #[error("could not serialize backup: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The preference store failed.
    #[error("backup preference store failed: {0}")]
    Preferences(String),

    /// The upload transport failed.
    #[error("upload failed: {0}")]
    Transport(String),
}

/// Errors while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path of the settings file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for [`crate::config::Settings`].
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        /// Path of the settings file.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Failures reading, writing or interpreting a cassette.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// The cassette file could not be read or written.
    #[error("cassette file {path}: {source}")]
    Io {
        /// Cassette path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The cassette is not valid YAML for [`crate::cassette::Cassette`].
    #[error("malformed cassette {path}: {source}")]
    Yaml {
        /// Cassette path.
        path: String,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A recorded output does not decode to what its channel returns.
    #[error("cassette entry {seq} on {channel}: {source}")]
    Output {
        /// Channel of the offending entry.
        channel: &'static str,
        /// Sequence number of the offending entry.
        seq: u64,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// A channel the session needs has nothing recorded.
    #[error("cassette has no {0} entries")]
    Missing(&'static str),
}
