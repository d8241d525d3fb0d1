//! Image decoding and re-encoding
//!
//! Uploaded bytes are decoded with the format guessed from their content, so
//! a payload that merely carries an image extension is still rejected. The
//! decoded image is then re-encoded in the format named by the stored
//! filename's extension.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::error::{UploadError, UploadResult};
use crate::filename::extension;

/// Image formats the backend stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Map an allowed extension to the format it stores as
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageKind::Png),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            _ => None,
        }
    }

    /// Format for a filename's final extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        extension(filename).and_then(|ext| Self::from_extension(&ext))
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decode raw bytes as an image
pub fn decode(data: &[u8]) -> UploadResult<DynamicImage> {
    image::load_from_memory(data).map_err(|e| UploadError::InvalidImage(e.to_string()))
}

/// Encode a decoded image as `kind`
///
/// JPEG has no alpha channel, so images are flattened to RGB first.
pub fn encode(image: &DynamicImage, kind: ImageKind) -> UploadResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());

    let result = match kind {
        ImageKind::Png => image.write_to(&mut buf, kind.format()),
        ImageKind::Jpeg => {
            DynamicImage::ImageRgb8(image.to_rgb8()).write_to(&mut buf, kind.format())
        }
    };
    result.map_err(|e| UploadError::Internal(format!("Failed to encode image: {}", e)))?;

    Ok(buf.into_inner())
}
