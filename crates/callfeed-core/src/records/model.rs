use serde::{Deserialize, Serialize};

/// Caller label used when no identity field is present.
pub const UNKNOWN_CALLER: &str = "Unknown";

/// The single internal shape every wire variant normalizes into.
///
/// Created fresh per load cycle. Serialized with camelCase keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub caller_label: String,
    /// Timestamp as sent by the API. May be empty or unparseable.
    pub created_at: String,
    /// At most three vanity candidates, source order preserved.
    pub candidates: Vec<String>,
}

impl Default for CanonicalRecord {
    fn default() -> Self {
        Self {
            caller_label: UNKNOWN_CALLER.to_string(),
            created_at: String::new(),
            candidates: Vec::new(),
        }
    }
}
