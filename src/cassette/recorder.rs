//! Builds cassettes for replayed sessions.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde_json::json;

use super::format::{Cassette, Channel};
use crate::error::CassetteError;
use crate::ports::transport::UploadedFile;

/// Collects clock readings and upload results, then writes them as a cassette.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// A recorder that will write to `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), cassette: Cassette::new(name) }
    }

    /// Records one `Clock::now` reading.
    pub fn clock_reading(&mut self, now: DateTime<FixedOffset>) -> &mut Self {
        self.cassette.push(Channel::ClockNow, serde_json::Value::Null, json!(now.to_rfc3339()));
        self
    }

    /// Records a successful upload of `file_name`.
    pub fn upload_ok(&mut self, file_name: &str, remote_id: &str) -> &mut Self {
        let file = UploadedFile { id: remote_id.to_string(), name: file_name.to_string() };
        self.cassette.push(Channel::Upload, json!({ "file_name": file_name }), json!({ "ok": file }));
        self
    }

    /// Records a failed upload of `file_name`.
    pub fn upload_err(&mut self, file_name: &str, message: &str) -> &mut Self {
        self.cassette.push(Channel::Upload, json!({ "file_name": file_name }), json!({ "err": message }));
        self
    }

    /// Writes the cassette and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, CassetteError> {
        self.cassette.save(&self.path)?;
        Ok(self.path)
    }
}
