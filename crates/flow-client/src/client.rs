//! HTTP client implementation

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use flow_core::models::{
    ErrorResponse, ProcessRequest, ProcessResponse, TestResponse, UploadResponse,
};

use crate::error::{FlowClientError, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Multipart field the server reads the image from
const IMAGE_FIELD: &str = "image";

/// Content type sent along with an uploaded file, from its extension
fn mime_for(filename: &str) -> &'static str {
    match flow_core::extension(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// figma-flow REST API client
#[derive(Debug, Clone)]
pub struct FlowClient {
    client: Client,
    base_url: Url,
}

impl FlowClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the server (e.g., "http://127.0.0.1:5000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Basic endpoints
    // =========================================================================

    /// Fetch the plain-text greeting from `/`
    #[instrument(skip(self))]
    pub async fn greeting(&self) -> Result<String> {
        let url = self.base_url.join("/")?;
        let response = self.send(self.client.get(url)).await?;
        self.handle_text(response).await
    }

    /// Check server health
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.send(self.client.get(url)).await?;
        self.handle_text(response).await
    }

    /// Fetch the static test payload
    #[instrument(skip(self))]
    pub async fn test(&self) -> Result<TestResponse> {
        let url = self.base_url.join("/api/test")?;
        let response = self.send(self.client.get(url)).await?;
        self.handle_response(response).await
    }

    // =========================================================================
    // Echo
    // =========================================================================

    /// Send `code` and `prompt` to be echoed back
    #[instrument(skip(self, code, prompt))]
    pub async fn process(
        &self,
        code: Option<&str>,
        prompt: Option<&str>,
    ) -> Result<ProcessResponse> {
        let request = ProcessRequest {
            code: code.map(String::from),
            prompt: prompt.map(String::from),
        };
        self.process_request(&request).await
    }

    /// Send a prepared echo request
    #[instrument(skip(self, request))]
    pub async fn process_request(&self, request: &ProcessRequest) -> Result<ProcessResponse> {
        let url = self.base_url.join("/api/process")?;
        let response = self.send(self.client.post(url).json(request)).await?;
        self.handle_response(response).await
    }

    // =========================================================================
    // Upload
    // =========================================================================

    /// Upload image bytes under `filename`
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_image(&self, filename: &str, data: Vec<u8>) -> Result<UploadResponse> {
        let url = self.base_url.join("/api/upload")?;
        debug!("Uploading {} to {}", filename, url);

        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self.send(self.client.post(url).multipart(form)).await?;
        self.handle_response(response).await
    }

    /// Read an image from disk and upload it under its file name
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn upload_image_file(&self, path: impl AsRef<Path>) -> Result<UploadResponse> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                FlowClientError::IoError(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Not a file path: {}", path.display()),
                ))
            })?;
        let data = tokio::fs::read(path).await?;

        self.upload_image(&filename, data).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        request.send().await.map_err(|e| {
            if e.is_timeout() {
                FlowClientError::Timeout
            } else {
                FlowClientError::HttpError(e)
            }
        })
    }

    /// Handle response and parse JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FlowClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    async fn handle_text(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    /// Extract error from failed response
    async fn extract_error(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> FlowClientError {
        // Try to parse error response body
        let message = match response.json::<ErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => format!("HTTP {}", status),
        };

        match status {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => FlowClientError::UnsupportedFileType(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => FlowClientError::Timeout,
            _ => FlowClientError::server_error(status.as_u16(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for("a.png"), "image/png");
        assert_eq!(mime_for("a.JPG"), "image/jpeg");
        assert_eq!(mime_for("a.jpeg"), "image/jpeg");
        assert_eq!(mime_for("notes.txt"), "application/octet-stream");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            FlowClient::new("not a url"),
            Err(FlowClientError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_io_error() {
        let client = FlowClient::new("http://127.0.0.1:9").unwrap();
        let err = client
            .upload_image_file("/definitely/not/here.png")
            .await
            .unwrap_err();
        assert!(matches!(err, FlowClientError::IoError(_)));
    }
}
