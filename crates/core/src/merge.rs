//! Right-biased merge of two JSON objects.

use serde_json::{Map, Value};

/// Merge two JSON objects field-wise; `overlay` wins on key collision.
///
/// Enrichment merges a raw lead with its lookup record through this, with
/// the lookup record as the overlay. Shallow by design: colliding values
/// are replaced wholesale, never merged recursively.
pub fn merge_records(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
