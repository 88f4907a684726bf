//! Image Upload Validation
//!
//! Files are checked locally before anything is sent: only `image/*` MIME
//! types up to [`MAX_UPLOAD_BYTES`] are accepted.

use thiserror::Error;

/// Largest file accepted for upload (10 MiB)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Multipart field the upload endpoint reads
pub const UPLOAD_FIELD: &str = "image";

/// Client-side upload rejections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Not an image: {mime_type:?}")]
    NotAnImage { mime_type: String },

    #[error("File is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
}

/// Check MIME type and size of a file about to be uploaded
pub fn validate_upload(mime_type: &str, size: u64) -> Result<(), UploadError> {
    let is_image = mime_type
        .trim()
        .get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("image/"))
        .unwrap_or(false);

    if !is_image {
        return Err(UploadError::NotAnImage {
            mime_type: mime_type.to_string(),
        });
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

/// A file selected for upload
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        validate_upload(&self.mime_type, self.size())
    }

    /// Read a file from disk, guessing its MIME type from the extension
    #[cfg(feature = "native")]
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let mime_type = mime_from_extension(path).to_string();

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// MIME type for common image extensions; anything else is opaque binary
pub fn mime_from_extension(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
