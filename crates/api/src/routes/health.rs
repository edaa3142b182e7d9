//! Health check endpoint.

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// GET /health - liveness probe.
///
/// The pipeline holds no in-process state worth reporting; readiness of the
/// backing services surfaces per-request instead.
pub async fn health_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
