// src/drive/client.rs
// Drive v3 REST client behind the DriveProvider trait

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::DriveProvider;
use super::types::{AccessToken, DriveFile, FileList};
use crate::config::UploaderConfig;
use crate::error::{ProviderError, ProviderResult};

const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
const MULTIPART_BOUNDARY: &str = "drivesort_upload_1a2b3c";

/// MIME type Drive assigns to folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Escape a string literal for the Drive query language.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn build_folder_query(parent_id: &str) -> String {
    format!(
        "'{}' in parents and mimeType='{}' and trashed=false",
        escape_query_value(parent_id),
        FOLDER_MIME_TYPE
    )
}

fn build_name_query(name: &str, parent_id: Option<&str>) -> String {
    let mut query = format!("name='{}'", escape_query_value(name));
    if let Some(parent) = parent_id {
        query.push_str(&format!(" and parents in '{}'", escape_query_value(parent)));
    }
    query
}

/// Assemble a multipart/related upload body: one JSON metadata part, one
/// media part, closed by the final boundary.
fn build_multipart_body(
    name: &str,
    parent_id: &str,
    media_type: &str,
    content: &[u8],
) -> Vec<u8> {
    let metadata = serde_json::json!({
        "name": name,
        "parents": [parent_id]
    });

    let mut body = Vec::with_capacity(content.len() + 512);
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {media_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// Authenticated Drive client. All calls carry the user's OAuth token;
/// there is no service-account path.
pub struct GoogleDriveClient {
    client: HttpClient,
    token: AccessToken,
}

impl GoogleDriveClient {
    pub fn new(config: &UploaderConfig, token: AccessToken) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(config.drive_timeout())
            .build()
            .context("failed to build Drive HTTP client")?;

        Ok(Self { client, token })
    }

    fn ensure_configured(&self) -> ProviderResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured)
        }
    }

    async fn get(&self, url: &str) -> ProviderResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn list_files(
        &self,
        query: &str,
        fields: &str,
        order_by: Option<&str>,
        page_size: Option<u32>,
    ) -> ProviderResult<Vec<DriveFile>> {
        let mut url = format!(
            "{DRIVE_API_BASE}/files?q={}&fields={}",
            urlencoding::encode(query),
            urlencoding::encode(fields)
        );
        if let Some(order) = order_by {
            url.push_str(&format!("&orderBy={order}"));
        }
        if let Some(size) = page_size {
            url.push_str(&format!("&pageSize={size}"));
        }

        let list: FileList = self.get(&url).await?.json().await?;
        Ok(list.files)
    }
}

#[async_trait]
impl DriveProvider for GoogleDriveClient {
    fn is_available(&self) -> bool {
        !self.token.is_empty()
    }

    async fn file_metadata(&self, file_id: &str, fields: &str) -> ProviderResult<DriveFile> {
        self.ensure_configured()?;

        let url = format!(
            "{DRIVE_API_BASE}/files/{file_id}?fields={}",
            urlencoding::encode(fields)
        );
        let file: DriveFile = self.get(&url).await?.json().await?;
        Ok(file)
    }

    async fn list_child_folders(&self, parent_id: &str) -> ProviderResult<Vec<DriveFile>> {
        self.ensure_configured()?;

        let query = build_folder_query(parent_id);
        let folders = self
            .list_files(&query, "files(id, name, parents)", Some("name"), None)
            .await?;
        debug!("Drive listed {} folders under {}", folders.len(), parent_id);
        Ok(folders)
    }

    async fn export_text(&self, document_id: &str) -> ProviderResult<String> {
        self.ensure_configured()?;

        let url = format!(
            "{DRIVE_API_BASE}/files/{document_id}/export?mimeType={}",
            urlencoding::encode("text/plain")
        );
        let text = self.get(&url).await?.text().await?;
        Ok(text)
    }

    async fn find_by_name(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> ProviderResult<Vec<DriveFile>> {
        self.ensure_configured()?;

        let query = build_name_query(name, parent_id);
        self.list_files(
            &query,
            "files(id, name, size, parents, createdTime, webViewLink)",
            None,
            Some(10),
        )
        .await
    }

    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        media_type: &str,
        content: Vec<u8>,
    ) -> ProviderResult<DriveFile> {
        self.ensure_configured()?;

        let url = format!(
            "{DRIVE_UPLOAD_BASE}/files?uploadType=multipart&fields={}",
            urlencoding::encode("id, name, webViewLink")
        );
        let body = build_multipart_body(name, parent_id, media_type, &content);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.as_str())
            .header(
                "Content-Type",
                format!("multipart/related; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let file: DriveFile = response.json().await?;
        debug!("Drive created file {} ({})", file.name, file.id);
        Ok(file)
    }

    fn name(&self) -> &'static str {
        "google-drive"
    }
}
