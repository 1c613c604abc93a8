// src/drive/mod.rs
//! Google Drive access layer.
//!
//! `DriveProvider` is the seam every service talks through; the REST
//! implementation lives in `client`. Tests swap in their own providers.

pub mod client;
pub mod types;

pub use client::GoogleDriveClient;
pub use types::{AccessToken, DriveFile};

use async_trait::async_trait;

use crate::error::ProviderResult;

/// Storage operations the upload workflow needs from Drive.
#[async_trait]
pub trait DriveProvider: Send + Sync {
    /// Whether the provider holds credentials worth trying.
    fn is_available(&self) -> bool;

    /// Fetch metadata for a single file, limited to `fields`.
    async fn file_metadata(&self, file_id: &str, fields: &str) -> ProviderResult<DriveFile>;

    /// List the non-trashed subfolders directly under `parent_id`, ordered by name.
    async fn list_child_folders(&self, parent_id: &str) -> ProviderResult<Vec<DriveFile>>;

    /// Export a Google Doc as plain text.
    async fn export_text(&self, document_id: &str) -> ProviderResult<String>;

    /// Find files named exactly `name`, optionally scoped to a parent folder.
    async fn find_by_name(&self, name: &str, parent_id: Option<&str>)
    -> ProviderResult<Vec<DriveFile>>;

    /// Upload `content` as a new file named `name` under `parent_id`.
    async fn create_file(
        &self,
        name: &str,
        parent_id: &str,
        media_type: &str,
        content: Vec<u8>,
    ) -> ProviderResult<DriveFile>;

    fn name(&self) -> &'static str;
}
