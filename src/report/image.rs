use std::path::Path;

use crate::{Error, Result};

/// A photo staged for upload alongside a report.
#[derive(PartialEq, Eq, Clone)]
pub struct ImageAttachment {
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME type, when it can be told from the file extension.
    pub content_type: Option<&'static str>,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Wrap bytes that are already in memory.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);

        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

// the bytes themselves are noise in logs
impl core::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(
            ImageAttachment::new("pothole.JPG", vec![]).content_type,
            Some("image/jpeg")
        );
        assert_eq!(
            ImageAttachment::new("tag.png", vec![]).content_type,
            Some("image/png")
        );
        assert_eq!(ImageAttachment::new("notes", vec![]).content_type, None);
    }

    #[test]
    fn test_read_missing_file() {
        let err = ImageAttachment::read(Path::new("/definitely/not/here.png")).unwrap_err();

        assert!(matches!(err, Error::Image { .. }));
    }
}
