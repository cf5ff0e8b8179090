use serde_json::Value;

use crate::records::fields::{CALLER_KEYS, TIMESTAMP_KEYS, first_text, resolve_candidates};
use crate::records::model::{CanonicalRecord, UNKNOWN_CALLER};

/// Locate the item list inside an unwrapped payload.
///
/// A bare array wins, then an `items` array. Anything else has no items.
pub fn items(value: &Value) -> &[Value] {
    value
        .as_array()
        .or_else(|| value.get("items").and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Map one raw item to a canonical record.
///
/// Total: non-object items resolve every field to its default.
pub fn normalize_item(item: &Value) -> CanonicalRecord {
    CanonicalRecord {
        caller_label: first_text(item, CALLER_KEYS).unwrap_or_else(|| UNKNOWN_CALLER.to_string()),
        created_at: first_text(item, TIMESTAMP_KEYS).unwrap_or_default(),
        candidates: resolve_candidates(item),
    }
}

/// Normalize an unwrapped payload into one record per item, input order kept.
pub fn normalize(value: &Value) -> Vec<CanonicalRecord> {
    items(value).iter().map(normalize_item).collect()
}
