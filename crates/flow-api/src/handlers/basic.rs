//! Greeting and static test handlers

use axum::Json;
use flow_core::TestResponse;

/// GET /
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// GET /api/test
/// Fixed payload, usable as a liveness check
pub async fn test_endpoint() -> Json<TestResponse> {
    Json(TestResponse::fixed())
}
