//! Image upload handler

use axum::extract::{Multipart, State};
use axum::Json;
use axum_extra::extract::WithRejection;
use flow_core::{process_upload, ImageUpload, UploadError, UploadResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field that carries the image
pub const IMAGE_FIELD: &str = "image";

/// POST /api/upload
/// Accept a PNG or JPEG image in the `image` multipart field and store it
pub async fn upload_image(
    State(state): State<AppState>,
    WithRejection(mut multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        upload = Some(ImageUpload::new(filename.as_deref(), data)?);
        break;
    }

    let upload = upload.ok_or(UploadError::MissingFile)?;

    tracing::info!(
        filename = %upload.original_filename(),
        size = upload.len(),
        "Image upload received"
    );

    let stored = process_upload(state.store(), upload).await?;

    Ok(Json(UploadResponse::stored(stored.filename)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use flow_core::{
        ErrorResponse, ImageStore, LocalImageStore, Status, StorageError, StorageResult,
        StoredImage,
    };
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use crate::{create_router, AppState};

    use super::*;

    /// Store whose disk is always full
    struct FullDiskStore;

    #[async_trait]
    impl ImageStore for FullDiskStore {
        async fn save(&self, _filename: &str, _data: &[u8]) -> StorageResult<StoredImage> {
            Err(StorageError::Io(std::io::Error::other("no space left on device")))
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([0, 128, 255])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn image_part(filename: &str, data: Vec<u8>) -> MultipartForm {
        MultipartForm::new().add_part(
            IMAGE_FIELD,
            Part::bytes(data).file_name(filename).mime_type("image/png"),
        )
    }

    async fn local_server() -> (tempfile::TempDir, TestServer) {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(tmp.path().join("uploads")).await.unwrap();
        let server = TestServer::new(create_router(AppState::new(Arc::new(store)))).unwrap();
        (tmp, server)
    }

    #[tokio::test]
    async fn test_upload_valid_png() {
        let (tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .multipart(image_part("photo.png", png_bytes()))
            .await;

        response.assert_status_ok();
        let body: UploadResponse = response.json();
        assert_eq!(body.status, Status::Success);
        assert_eq!(body.filename, "photo.png");
        assert_eq!(body.message, "File uploaded successfully");
        assert!(tmp.path().join("uploads").join("photo.png").is_file());
    }

    #[tokio::test]
    async fn test_upload_without_image_field() {
        let (_tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_text("caption", "no file here"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.status, Status::Error);
        assert_eq!(body.error, "No image file provided");
    }

    #[tokio::test]
    async fn test_upload_with_empty_filename() {
        let (_tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .multipart(image_part("", png_bytes()))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.status, Status::Error);
        assert_eq!(body.error, "No selected file");
    }

    #[tokio::test]
    async fn test_upload_image_field_without_filename() {
        let (_tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .multipart(MultipartForm::new().add_text(IMAGE_FIELD, "plain text value"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "No selected file");
    }

    #[tokio::test]
    async fn test_upload_disallowed_extension() {
        let (tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .multipart(image_part("notes.txt", b"hello".to_vec()))
            .await;

        response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "File type not allowed: notes.txt");
        assert!(!tmp.path().join("uploads").join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_upload_undecodable_image() {
        let (tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .multipart(image_part("broken.png", b"\x89PNG but not really".to_vec()))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(body.error.starts_with("Invalid image data"));
        assert!(!tmp.path().join("uploads").join("broken.png").exists());
    }

    #[tokio::test]
    async fn test_upload_over_body_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(tmp.path()).await.unwrap();
        let state = AppState::new(Arc::new(store)).with_max_upload_bytes(1024);
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server
            .post("/api/upload")
            .multipart(image_part("big.png", vec![0u8; 64 * 1024]))
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upload_storage_failure_is_server_error() {
        let server = TestServer::new(create_router(AppState::new(Arc::new(FullDiskStore)))).unwrap();

        let response = server
            .post("/api/upload")
            .multipart(image_part("photo.png", png_bytes()))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body.status, Status::Error);
        assert!(body.error.contains("no space left"));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_multipart_body() {
        let (_tmp, server) = local_server().await;

        let response = server
            .post("/api/upload")
            .json(&serde_json::json!({ "image": "photo.png" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.status, Status::Error);
    }
}
