//! Upload pipeline: validate, sanitize, decode, store

use bytes::Bytes;

use crate::codec::{self, ImageKind};
use crate::error::{UploadError, UploadResult};
use crate::filename::{allowed_file, sanitize};
use crate::storage::ImageStore;

/// An image received from a client, before any checks
#[derive(Debug, Clone)]
pub struct ImageUpload {
    filename: String,
    data: Bytes,
}

impl ImageUpload {
    /// Wrap an uploaded file, rejecting an absent or empty filename
    pub fn new(filename: Option<&str>, data: Bytes) -> UploadResult<Self> {
        match filename {
            Some(name) if !name.is_empty() => Ok(Self {
                filename: name.to_string(),
                data,
            }),
            _ => Err(UploadError::EmptyFilename),
        }
    }

    /// Filename exactly as the client sent it
    pub fn original_filename(&self) -> &str {
        &self.filename
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Sanitized name the image was stored under
    pub filename: String,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
    /// Bytes written after re-encoding
    pub size: usize,
}

/// Run an upload through the full acceptance pipeline and persist it.
///
/// The extension is checked on the original name, then again on the
/// sanitized name that is actually written. Decoding and re-encoding run on
/// the blocking pool.
pub async fn process_upload(
    store: &dyn ImageStore,
    upload: ImageUpload,
) -> UploadResult<StoredUpload> {
    let ImageUpload { filename, data } = upload;

    if !allowed_file(&filename) {
        return Err(UploadError::UnsupportedType(filename));
    }

    let safe_name = sanitize(&filename)
        .filter(|name| allowed_file(name))
        .ok_or_else(|| UploadError::InvalidFilename(filename.clone()))?;

    let kind = ImageKind::from_filename(&safe_name)
        .ok_or_else(|| UploadError::UnsupportedType(safe_name.clone()))?;

    let (encoded, width, height) = tokio::task::spawn_blocking(move || {
        let image = codec::decode(&data)?;
        let encoded = codec::encode(&image, kind)?;
        Ok::<_, UploadError>((encoded, image.width(), image.height()))
    })
    .await
    .map_err(|e| UploadError::Internal(format!("Image task failed: {}", e)))??;

    let stored = store.save(&safe_name, &encoded).await?;

    tracing::info!(
        original = %filename,
        filename = %safe_name,
        kind = ?kind,
        width,
        height,
        size = stored.size,
        "Image stored"
    );

    Ok(StoredUpload {
        filename: safe_name,
        kind,
        width,
        height,
        size: stored.size,
    })
}
