//! Field precedence tables for raw call items.
//!
//! Each canonical field is resolved independently by walking its table in
//! order and taking the first alternative that yields a usable value.
//! Nothing here fails: an item missing every alternative resolves to the
//! field's default.

use serde_json::Value;

use crate::config::CANDIDATE_LIMIT;

/// Caller identity keys, highest precedence first.
pub const CALLER_KEYS: &[&str] = &["caller", "caller_number"];

/// Timestamp keys, highest precedence first.
pub const TIMESTAMP_KEYS: &[&str] = &["created_at", "createdAt", "ts"];

/// Where a candidate list can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Array of candidate strings under `key`.
    Strings { key: &'static str },
    /// Array of objects under `key`, projecting each object's `field`.
    Projected {
        key: &'static str,
        field: &'static str,
    },
}

/// Candidate sources, highest precedence first.
pub const CANDIDATE_SOURCES: &[CandidateSource] = &[
    CandidateSource::Strings { key: "top3" },
    CandidateSource::Strings {
        key: "vanity_candidates",
    },
    CandidateSource::Projected {
        key: "raw",
        field: "display",
    },
];

/// Render a scalar as text if it counts as present.
///
/// Non-empty strings and numbers are present; every other JSON value is
/// treated as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First present scalar among `keys`.
pub fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find_map(scalar_text)
}

/// Keep a candidate entry only if it is truthy.
fn candidate_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Number(_) => None,
        other => scalar_text(other),
    }
}

impl CandidateSource {
    /// Candidates from this source, filtered and capped.
    /// Empty when the key is missing or not an array.
    pub fn extract(&self, item: &Value) -> Vec<String> {
        let key = match self {
            Self::Strings { key } | Self::Projected { key, .. } => key,
        };
        let Some(entries) = item.get(*key).and_then(Value::as_array) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match self {
                Self::Strings { .. } => candidate_text(entry),
                Self::Projected { field, .. } => entry.get(*field).and_then(candidate_text),
            })
            .take(CANDIDATE_LIMIT)
            .collect()
    }
}

/// Resolve candidates: first source with at least one entry wins.
pub fn resolve_candidates(item: &Value) -> Vec<String> {
    CANDIDATE_SOURCES
        .iter()
        .map(|source| source.extract(item))
        .find(|candidates| !candidates.is_empty())
        .unwrap_or_default()
}
