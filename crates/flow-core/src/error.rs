//! Error types for the upload pipeline and image storage

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for upload processing
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors raised by an [`ImageStore`](crate::storage::ImageStore)
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filename is not a single plain path component
    #[error("Refusing to store file under unsafe name: {0}")]
    UnsafeName(String),

    /// Underlying filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that reject an image upload
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart form carried no `image` field
    #[error("No image file provided")]
    MissingFile,

    /// The `image` field carried an empty filename
    #[error("No selected file")]
    EmptyFilename,

    /// The final extension is not in the allow-list
    #[error("File type not allowed: {0}")]
    UnsupportedType(String),

    /// Nothing safe remained after sanitizing the filename
    #[error("Invalid filename")]
    InvalidFilename(String),

    /// The payload did not decode as an image
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    /// Persisting the image failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UploadError {
    /// Whether the client is at fault for this error
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UploadError::Storage(_) | UploadError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(UploadError::MissingFile.is_client_error());
        assert!(UploadError::EmptyFilename.is_client_error());
        assert!(UploadError::UnsupportedType("a.txt".into()).is_client_error());
        assert!(UploadError::InvalidFilename("..".into()).is_client_error());
        assert!(UploadError::InvalidImage("truncated".into()).is_client_error());
    }

    #[test]
    fn test_server_errors() {
        let io = std::io::Error::other("disk full");
        assert!(!UploadError::Storage(StorageError::Io(io)).is_client_error());
        assert!(!UploadError::Storage(StorageError::UnsafeName("../x".into())).is_client_error());
        assert!(!UploadError::Internal("task panicked".into()).is_client_error());
    }
}
