//! Lead payload handling and storage key derivation.
//!
//! A lead payload is an arbitrary JSON object. The only field this system
//! ever looks at is `lead_id`, which feeds the storage key templates:
//!
//! - raw: `raw/crm_event_{lead_id}_{unix_ts}.json`
//! - lookup (external, read-only): `{lead_id}.json`
//! - enriched: `enriched/crm_enriched_{lead_id}_{unix_ts}.json`

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Identifier used when a payload carries no usable `lead_id`.
pub const UNKNOWN_LEAD_ID: &str = "unknown";

/// Parse a request body into a lead payload.
///
/// A missing, malformed, or non-object body yields an empty object; the
/// ingestion path never rejects a payload.
pub fn parse_lead_payload(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Derive the lead identifier from a payload, falling back to `unknown`.
pub fn lead_id(payload: &Map<String, Value>) -> &str {
    payload
        .get("lead_id")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_LEAD_ID)
}

/// Current UTC time as epoch seconds, the granularity all keys use.
pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Storage key for a raw lead object.
pub fn raw_object_key(lead_id: &str, timestamp: i64) -> String {
    format!("raw/crm_event_{}_{}.json", lead_id, timestamp)
}

/// Storage key for an enriched lead object.
pub fn enriched_object_key(lead_id: &str, timestamp: i64) -> String {
    format!("enriched/crm_enriched_{}_{}.json", lead_id, timestamp)
}

/// Storage key for a lookup record in the external lookup bucket.
pub fn lookup_object_key(lead_id: &str) -> String {
    format!("{}.json", lead_id)
}

/// Deferred work item referencing a raw object by storage key.
///
/// This is the entire queue message body; lead content is re-fetched from
/// storage at enrichment time, never carried in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub s3_key: String,
}

impl WorkItem {
    pub fn new(s3_key: impl Into<String>) -> Self {
        Self {
            s3_key: s3_key.into(),
        }
    }

    /// Parse a queue message body. Fails if the body is not JSON or the
    /// `s3_key` field is absent.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
