//! Wire models shared by the server and the client

use serde::{Deserialize, Serialize};

/// Outcome marker carried by every JSON envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

// =============================================================================
// Static test endpoint
// =============================================================================

/// Fixed payload returned by `GET /api/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResponse {
    pub message: String,
    pub status: Status,
    pub data: TestData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestData {
    pub sample: String,
    pub number: i64,
}

impl TestResponse {
    /// The one payload the test endpoint ever returns
    pub fn fixed() -> Self {
        Self {
            message: "This is a test response".to_string(),
            status: Status::Success,
            data: TestData {
                sample: "value".to_string(),
                number: 42,
            },
        }
    }
}

// =============================================================================
// Echo endpoint
// =============================================================================

/// Request body for `POST /api/process`
///
/// Both fields are optional; absent fields echo back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Response for `POST /api/process`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub status: Status,
    pub received_data: ProcessRequest,
}

impl ProcessResponse {
    pub fn echo(request: ProcessRequest) -> Self {
        Self {
            status: Status::Success,
            received_data: request,
        }
    }
}

// =============================================================================
// Upload endpoint
// =============================================================================

/// Response for a successful `POST /api/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: Status,
    pub message: String,
    /// Sanitized name the image was stored under
    pub filename: String,
}

impl UploadResponse {
    pub fn stored(filename: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: "File uploaded successfully".to_string(),
            filename: filename.into(),
        }
    }
}

/// Error envelope returned by every failing JSON endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: Status,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: error.into(),
        }
    }
}
