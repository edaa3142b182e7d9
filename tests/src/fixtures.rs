//! Test fixtures for lead payloads and lookup records.

use serde_json::{json, Value};

/// A lead payload with an id and display name.
pub fn lead_payload(lead_id: &str, display_name: &str) -> Value {
    json!({
        "lead_id": lead_id,
        "display_name": display_name,
        "source": "webform"
    })
}

/// A lead payload without a `lead_id` field.
pub fn anonymous_payload() -> Value {
    json!({ "display_name": "Anonymous" })
}

/// A lookup record as the external process would publish it.
pub fn lookup_record(owner: &str, status: &str, created: &str) -> Value {
    json!({
        "lead_owner": owner,
        "status_label": status,
        "date_created": created
    })
}

/// Serialize a payload for a request body.
pub fn payload_body(payload: &Value) -> String {
    payload.to_string()
}

/// A body that is not valid JSON.
pub fn malformed_body() -> &'static str {
    "{{{ this is not json"
}
