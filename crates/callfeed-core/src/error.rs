use serde::{Deserialize, Serialize};

/// Failure of a single load cycle.
///
/// Only the fetch and unwrap boundary can produce one of these.
/// Normalization and selection are total and never fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("{}", transport_message(.status, .reason))]
    TransportFailure { status: Option<u16>, reason: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

fn transport_message(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("HTTP {code}"),
        None => reason.to_string(),
    }
}

impl PipelineError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::TransportFailure {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn http_status(code: u16) -> Self {
        Self::TransportFailure {
            status: Some(code),
            reason: format!("unexpected status {code}"),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload(reason.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TransportFailure { .. } => ErrorKind::TransportFailure,
            Self::MalformedPayload(_) => ErrorKind::MalformedPayload,
        }
    }

    /// HTTP status carried by a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TransportFailure { status, .. } => *status,
            Self::MalformedPayload(_) => None,
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

/// Structured failure kind handed to presenters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    TransportFailure,
    MalformedPayload,
}
