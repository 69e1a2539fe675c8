//! On-disk cassette layout.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CassetteError;

/// The port calls a cassette can pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// `Clock::now`; output is an RFC 3339 timestamp.
    ClockNow,
    /// `BackupTransport::upload`; output is `{"ok": file}` or `{"err": msg}`.
    Upload,
}

impl Channel {
    /// Stable name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClockNow => "clock_now",
            Self::Upload => "upload",
        }
    }
}

/// One recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Position in the whole cassette, assigned on push.
    pub seq: u64,
    /// Which call this answers.
    pub channel: Channel,
    /// Arguments the call was made with.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub input: serde_json::Value,
    /// What the call returned.
    pub output: serde_json::Value,
}

/// A named, ordered list of recorded calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the cassette was written.
    pub recorded_at: DateTime<Utc>,
    /// Recorded calls in the order they happened.
    pub entries: Vec<Entry>,
}

impl Cassette {
    /// An empty cassette stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), recorded_at: Utc::now(), entries: Vec::new() }
    }

    /// Appends a call, numbering it after the last entry.
    pub fn push(&mut self, channel: Channel, input: serde_json::Value, output: serde_json::Value) {
        let seq = self.entries.last().map_or(0, |e| e.seq + 1);
        self.entries.push(Entry { seq, channel, input, output });
    }

    /// Entries recorded on `channel`, in order.
    pub fn on(&self, channel: Channel) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.channel == channel)
    }

    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CassetteError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CassetteError::Io { path: path.display().to_string(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| CassetteError::Yaml { path: path.display().to_string(), source })
    }

    /// Writes the cassette as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), CassetteError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|source| CassetteError::Yaml { path: path.display().to_string(), source })?;
        std::fs::write(path, yaml)
            .map_err(|source| CassetteError::Io { path: path.display().to_string(), source })
    }
}
