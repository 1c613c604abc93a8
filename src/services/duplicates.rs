// src/services/duplicates.rs
// Pre-flight duplicate scan by exact name and near-identical size

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::drive::DriveProvider;
use crate::error::{ProviderError, ProviderResult};

/// An existing Drive file that matches the upload candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub id: String,
    pub name: String,
    pub size_bytes: u64,
    pub created_time: String,
    pub web_link: String,
    pub size_difference: u64,
}

/// Looks for an already-uploaded copy before the analysis pipeline runs.
///
/// Unlike the other stages this one surfaces its errors; the orchestrator
/// logs them and continues, since a failed check must never block an upload.
pub struct DuplicateChecker {
    drive: Arc<dyn DriveProvider>,
}

impl DuplicateChecker {
    pub fn new(drive: Arc<dyn DriveProvider>) -> Self {
        Self { drive }
    }

    /// Bytes of size drift still treated as the same file.
    fn size_threshold(size_bytes: u64) -> u64 {
        1024u64.max((size_bytes as f64 * 0.05) as u64)
    }

    /// First name match within the size threshold wins; hits are checked in
    /// listing order.
    pub async fn find_duplicate(
        &self,
        name: &str,
        size_bytes: u64,
        root_id: Option<&str>,
    ) -> ProviderResult<Option<DuplicateMatch>> {
        if !self.drive.is_available() {
            return Err(ProviderError::NotConfigured);
        }

        info!("🔍 Checking for duplicate files: {} ({} bytes)", name, size_bytes);

        let hits = self.drive.find_by_name(name, root_id).await?;
        debug!("Found {} files with matching names", hits.len());

        let threshold = Self::size_threshold(size_bytes);
        for hit in hits {
            let existing_size = hit.size_bytes();
            let difference = existing_size.abs_diff(size_bytes);
            if difference <= threshold {
                info!("⚠️ Potential duplicate found: {} (ID: {})", hit.name, hit.id);
                return Ok(Some(DuplicateMatch {
                    id: hit.id,
                    name: hit.name,
                    size_bytes: existing_size,
                    created_time: hit.created_time.unwrap_or_default(),
                    web_link: hit.web_view_link.unwrap_or_default(),
                    size_difference: difference,
                }));
            }
        }

        Ok(None)
    }
}
