use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire shapes the recent-calls endpoint has produced over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `[ {...}, ... ]`
    Array,
    /// `{ "items": [ ... ] }`
    Items,
    /// `{ "statusCode": 200, "headers": {...}, "body": "<json text>" }`
    ProxyEnvelope,
    /// Anything else; normalizes to zero records.
    Unrecognized,
}

impl PayloadShape {
    /// Classify a decoded value.
    ///
    /// Checked in order: proxy envelope (string `body`), bare array,
    /// `items` array, fallback.
    pub fn of(value: &Value) -> Self {
        if value.get("body").is_some_and(Value::is_string) {
            Self::ProxyEnvelope
        } else if value.is_array() {
            Self::Array
        } else if value.get("items").is_some_and(Value::is_array) {
            Self::Items
        } else {
            Self::Unrecognized
        }
    }
}

impl std::fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Array => "array",
            Self::Items => "items",
            Self::ProxyEnvelope => "proxy_envelope",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
