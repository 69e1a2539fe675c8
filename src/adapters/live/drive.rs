//! Live adapter for the `BackupTransport` port using the Google Drive v3 API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::PortError;
use crate::ports::transport::{BackupTransport, UploadFuture, UploadedFile};

const DRIVE_UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart&supportsAllDrives=true&fields=id,name,parents";
const BOUNDARY: &str = "dailystuff-backup-boundary";

/// Upper bound on one upload, connect included. The upload runs before the
/// day view prints, so a stalled connection must give up quickly.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Uploads backups into one Drive folder with a bearer token.
pub struct DriveTransport {
    client: Result<Client, String>,
    folder_id: String,
    access_token: Option<String>,
}

impl DriveTransport {
    /// Creates a transport targeting `folder_id`.
    ///
    /// Without a token every upload fails with a sign-in message. If the
    /// HTTP client cannot be built, every upload fails with that cause.
    #[must_use]
    pub fn new(folder_id: impl Into<String>, access_token: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("dailystuff/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"));
        Self { client, folder_id: folder_id.into(), access_token }
    }
}

/// File metadata part of the multipart upload.
#[derive(Serialize)]
struct FileMetadata<'a> {
    name: &'a str,
    parents: [&'a str; 1],
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
}

/// Fields returned by Drive for a created file.
#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

/// Error response from the Drive API.
#[derive(Deserialize)]
struct DriveError {
    error: DriveErrorDetail,
}

/// Detail inside a Drive error response.
#[derive(Deserialize)]
struct DriveErrorDetail {
    message: String,
}

/// Builds a `multipart/related` body with metadata first, content second.
fn multipart_body(metadata: &str, content: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
         --{BOUNDARY}\r\nContent-Type: application/json\r\n\r\n{content}\r\n--{BOUNDARY}--\r\n"
    )
}

impl BackupTransport for DriveTransport {
    fn upload(&self, file_name: &str, json: &str) -> UploadFuture<'_> {
        let file_name = file_name.to_string();
        let json = json.to_string();

        Box::pin(async move {
            let client = self.client.as_ref().map_err(|e| -> PortError { e.clone().into() })?;
            let token = self.access_token.as_deref().ok_or_else(|| -> PortError {
                "No Drive access token configured; set DAILYSTUFF_DRIVE_TOKEN".into()
            })?;

            let metadata = serde_json::to_string(&FileMetadata {
                name: &file_name,
                parents: [self.folder_id.as_str()],
                mime_type: "application/json",
            })?;

            tracing::debug!(file = %file_name, folder = %self.folder_id, bytes = json.len(), "uploading backup");

            let response = client
                .post(DRIVE_UPLOAD_URL)
                .bearer_auth(token)
                .header("Content-Type", format!("multipart/related; boundary={BOUNDARY}"))
                .body(multipart_body(&metadata, &json))
                .send()
                .await
                .map_err(|e| -> PortError {
                    if e.is_timeout() {
                        format!("Drive upload timed out after {}s", UPLOAD_TIMEOUT.as_secs()).into()
                    } else {
                        format!("Drive upload request failed: {e}").into()
                    }
                })?;

            let status = response.status();
            let response_text = response.text().await.map_err(|e| -> PortError {
                format!("Failed to read Drive response: {e}").into()
            })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<DriveError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("Drive API error ({}): {msg}", status.as_u16()).into());
            }

            let file: DriveFile = serde_json::from_str(&response_text).map_err(|e| -> PortError {
                format!("Failed to parse Drive response: {e}").into()
            })?;

            Ok::<_, PortError>(UploadedFile { id: file.id, name: file.name })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_body_has_both_parts_and_closing_boundary() {
        let body = multipart_body("{\"name\":\"a.json\"}", "{\"tasks\":[]}");
        assert_eq!(body.matches(&format!("--{BOUNDARY}\r\n")).count(), 2);
        assert!(body.ends_with(&format!("--{BOUNDARY}--\r\n")));
        assert!(body.find("a.json").unwrap() < body.find("tasks").unwrap());
    }

    #[test]
    fn client_is_built_with_a_bounded_timeout() {
        let transport = DriveTransport::new("folder", Some("token".into()));
        assert!(transport.client.is_ok());
        assert!(UPLOAD_TIMEOUT.as_secs() > 0 && UPLOAD_TIMEOUT.as_secs() <= 30);
        assert!(CONNECT_TIMEOUT <= UPLOAD_TIMEOUT);
    }

    #[tokio::test]
    async fn unbuildable_client_surfaces_as_upload_error() {
        let transport = DriveTransport {
            client: Err("Failed to build HTTP client: no TLS backend".into()),
            folder_id: "folder".into(),
            access_token: Some("token".into()),
        };
        let err = transport.upload("a.json", "{}").await.unwrap_err();
        assert!(err.to_string().contains("no TLS backend"));
    }

    #[tokio::test]
    async fn upload_without_token_fails_before_any_request() {
        let transport = DriveTransport::new("folder", None);
        let err = transport.upload("a.json", "{}").await.unwrap_err();
        assert!(err.to_string().contains("DAILYSTUFF_DRIVE_TOKEN"));
    }
}
