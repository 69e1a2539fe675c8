//! Backup transport port.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// Boxed future returned by [`BackupTransport::upload`].
pub type UploadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<UploadedFile, PortError>> + Send + 'a>>;

/// What the remote service reports about a stored backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Remote file identity.
    pub id: String,
    /// Stored file name.
    pub name: String,
}

/// Stores backup documents with a remote file-storage service.
pub trait BackupTransport: Send + Sync {
    /// Uploads a JSON document under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, quota, etc.).
    fn upload(&self, file_name: &str, json: &str) -> UploadFuture<'_>;
}
