//! Replaying adapter for the `BackupTransport` port.

use std::sync::{Mutex, PoisonError};

use crate::cassette::{CassetteReplayer, Channel, Entry};
use crate::error::PortError;
use crate::ports::transport::{BackupTransport, UploadFuture, UploadedFile};

/// Serves recorded upload results and remembers what was uploaded.
pub struct ReplayingTransport {
    replayer: Mutex<CassetteReplayer>,
    uploads: Mutex<Vec<(String, String)>>,
}

impl ReplayingTransport {
    /// Creates a replaying transport from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer), uploads: Mutex::new(Vec::new()) }
    }

    /// `(file_name, json)` pairs passed to `upload`, in call order.
    #[must_use]
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Decodes `{"ok": file}` or `{"err": "message"}`.
fn upload_result(entry: Entry) -> Result<UploadedFile, PortError> {
    if let Some(err) = entry.output.get("err") {
        return Err(err.as_str().unwrap_or("upload failed").into());
    }
    let file = entry.output.get("ok").cloned().unwrap_or(entry.output);
    serde_json::from_value(file)
        .map_err(|e| format!("cassette entry {}: bad upload result: {e}", entry.seq).into())
}

impl BackupTransport for ReplayingTransport {
    fn upload(&self, file_name: &str, json: &str) -> UploadFuture<'_> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((file_name.to_string(), json.to_string()));
        let entry = self.replayer.lock().unwrap_or_else(PoisonError::into_inner).next(Channel::Upload);
        let result = match entry {
            Some(entry) => upload_result(entry),
            None => Err(format!("cassette has no upload result for {file_name}").into()),
        };
        Box::pin(async move { result })
    }
}
