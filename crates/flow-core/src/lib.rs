//! flow-core - Core types and upload pipeline for the figma-flow backend
//!
//! This crate holds everything the HTTP layer delegates to: filename
//! validation and sanitizing, image decoding, the [`ImageStore`] abstraction
//! with its local-directory implementation, and the wire models shared by the
//! server and the client.

pub mod codec;
pub mod error;
pub mod filename;
pub mod models;
pub mod storage;
pub mod upload;

pub use codec::ImageKind;
pub use error::{StorageError, StorageResult, UploadError, UploadResult};
pub use filename::{allowed_file, extension, sanitize, ALLOWED_EXTENSIONS};
pub use models::*;
pub use storage::{ensure_upload_dir, ImageStore, LocalImageStore, StoredImage};
pub use upload::{process_upload, ImageUpload, StoredUpload};
