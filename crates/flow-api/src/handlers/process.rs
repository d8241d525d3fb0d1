//! Echo handler

use axum::Json;
use axum_extra::extract::WithRejection;
use flow_core::{ProcessRequest, ProcessResponse};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// POST /api/process
/// Reflect `code` and `prompt` back unchanged
///
/// The body is taken as a JSON object first; a derived struct would also
/// accept arrays positionally.
pub async fn process_data(
    WithRejection(Json(body), _): WithRejection<Json<Map<String, Value>>, ApiError>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let request: ProcessRequest = serde_json::from_value(Value::Object(body))
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;

    tracing::debug!(
        code_len = request.code.as_ref().map(String::len),
        prompt_len = request.prompt.as_ref().map(String::len),
        "Echoing process request"
    );

    Ok(Json(ProcessResponse::echo(request)))
}
