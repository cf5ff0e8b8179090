use chrono::{SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::SCHEMA_VERSION;
use crate::error::{ErrorKind, PipelineError};
use crate::payload::read::PayloadInfo;
use crate::records::model::CanonicalRecord;

/// Result of one load cycle, as handed to presenters.
///
/// Serializes to `{ schema_version, tool, fetched_at, payload, ok, ... }`
/// where the trailing fields are those of [`Outcome`].
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    pub schema_version: String,
    pub tool: ToolInfo,
    /// RFC 3339, UTC, second precision.
    pub fetched_at: String,
    /// Absent when the fetch itself failed.
    pub payload: Option<PayloadInfo>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl FeedReport {
    pub fn new(
        tool: ToolInfo,
        payload: Option<PayloadInfo>,
        result: Result<Vec<CanonicalRecord>, PipelineError>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            payload,
            outcome: result.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Loaded { .. })
    }

    /// Selected records; empty for failed cycles.
    pub fn records(&self) -> &[CanonicalRecord] {
        match &self.outcome {
            Outcome::Loaded { records } => records.as_slice(),
            Outcome::Failed { .. } => &[],
        }
    }

    /// Payload fingerprint, if a payload was fetched.
    pub fn payload_hash(&self) -> Option<&str> {
        self.payload.as_ref().map(|p| p.hash.value.as_str())
    }

    /// Process exit code: 0 for a loaded feed (empty or not), 1 for a failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_ok() { 0 } else { 1 }
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Either the selected records or a structured failure.
///
/// Serialized as `{ "ok": true, "records": [...] }` or
/// `{ "ok": false, "kind": "...", "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded { records: Vec<CanonicalRecord> },
    Failed { kind: ErrorKind, message: String },
}

impl From<Result<Vec<CanonicalRecord>, PipelineError>> for Outcome {
    fn from(result: Result<Vec<CanonicalRecord>, PipelineError>) -> Self {
        match result {
            Ok(records) => Outcome::Loaded { records },
            Err(err) => Outcome::Failed {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Loaded { records } => {
                let mut s = serializer.serialize_struct("Outcome", 2)?;
                s.serialize_field("ok", &true)?;
                s.serialize_field("records", records)?;
                s.end()
            }
            Outcome::Failed { kind, message } => {
                let mut s = serializer.serialize_struct("Outcome", 3)?;
                s.serialize_field("ok", &false)?;
                s.serialize_field("kind", kind)?;
                s.serialize_field("message", message)?;
                s.end()
            }
        }
    }
}
