// src/types.rs
// Upload request metadata

use serde::{Deserialize, Serialize};

/// Metadata for one uploaded file, created per request and discarded when
/// the workflow completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
        }
    }

    /// Build a descriptor guessing the media type from the filename
    /// extension. Unknown extensions fall back to a generic binary type.
    pub fn from_name(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let media_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            media_type,
            size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_guesses_media_type() {
        let file = FileDescriptor::from_name("Corporate Profile.pdf", 2_800_000);
        assert_eq!(file.media_type, "application/pdf");
        assert_eq!(file.size_bytes, 2_800_000);

        let file = FileDescriptor::from_name("deck.pptx", 1024);
        assert!(file.media_type.contains("presentation"));
    }

    #[test]
    fn test_from_name_unknown_extension() {
        let file = FileDescriptor::from_name("mystery.zzz9", 10);
        assert_eq!(file.media_type, "application/octet-stream");
    }
}
