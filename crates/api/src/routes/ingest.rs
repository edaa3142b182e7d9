//! Ingestion endpoint handler.
//!
//! Accepts an arbitrary JSON lead payload, persists it verbatim to the raw
//! store under a timestamped key, and enqueues a deferred work item
//! referencing that key. The payload is never validated; a malformed body
//! is stored as an empty object under the `unknown` lead id.

use axum::{body::Bytes, extract::State, Json};
use pipeline_core::{lead_id, parse_lead_payload, raw_object_key, unix_timestamp, WorkItem};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::response::{ApiError, IngestResponse};
use crate::state::AppState;

/// POST /ingest - lead ingestion endpoint.
///
/// One storage write plus one queue publish per request. Neither call is
/// retried; a queue failure after a successful write leaves the raw object
/// in place (no rollback).
pub async fn ingest_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IngestResponse>, ApiError> {
    let start = Instant::now();

    let payload = parse_lead_payload(&body);
    let lead = lead_id(&payload).to_string();
    let key = raw_object_key(&lead, unix_timestamp());

    debug!(lead_id = %lead, key = %key, payload_size = body.len(), "Received lead");

    let raw_json = serde_json::to_vec(&Value::Object(payload)).map_err(|e| {
        error!("Failed to serialize lead payload: {}", e);
        ApiError::internal("Failed to serialize payload")
    })?;

    state
        .raw_store
        .put(&key, raw_json.into())
        .await
        .map_err(|e| {
            error!(key = %key, "Failed to store raw lead: {}", e);
            ApiError::from(e)
        })?;

    let work_item = WorkItem::new(&key);
    state
        .queue
        .send_delayed(work_item.to_json().map_err(ApiError::from)?)
        .await
        .map_err(|e| {
            error!(key = %key, "Failed to enqueue work item: {}", e);
            ApiError::from(e)
        })?;

    info!(
        lead_id = %lead,
        key = %key,
        latency_ms = start.elapsed().as_millis() as u64,
        "Lead ingested"
    );

    Ok(Json(IngestResponse::received(key)))
}
