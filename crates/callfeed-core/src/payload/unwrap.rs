//! Decoding and proxy-envelope removal.
//!
//! API Gateway proxy integrations wrap the real response as a JSON string
//! inside `body`. Exactly one such layer is removed here; anything else
//! passes through untouched for the normalizer to sort out.

use serde_json::Value;

use crate::error::PipelineError;

/// Parse raw response bytes as JSON.
pub fn decode(bytes: &[u8]) -> Result<Value, PipelineError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(PipelineError::malformed("empty response body"));
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Remove one optional proxy-envelope layer.
///
/// With `strict_envelope` set, an envelope whose numeric `statusCode` is
/// outside 2xx is reported as a transport failure rather than decoded.
pub fn unwrap(raw: Value, strict_envelope: bool) -> Result<Value, PipelineError> {
    let Some(body) = raw.get("body").and_then(Value::as_str) else {
        return Ok(raw);
    };

    if strict_envelope {
        if let Some(code) = raw.get("statusCode").and_then(Value::as_u64) {
            if !(200..=299).contains(&code) {
                return Err(PipelineError::http_status(
                    u16::try_from(code).unwrap_or(u16::MAX),
                ));
            }
        }
    }

    serde_json::from_str(body)
        .map_err(|e| PipelineError::malformed(format!("envelope body is not JSON: {e}")))
}
