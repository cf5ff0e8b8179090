//! Recent-calls feed: fetch, unwrap, normalize, select, present.
//!
//! ```text
//! Fetch ──► decode ──► unwrap ──► normalize ──► select ──► Presenter
//! ```
//!
//! Only the fetch and unwrap boundary can fail. Everything after it is a
//! pure, total transformation of one payload snapshot.

pub mod config;
pub mod error;
pub mod fetch;
pub mod payload;
pub mod records;
pub mod report;
pub mod select;

use config::PipelineConfig;
use error::PipelineError;
use fetch::Fetch;
use payload::shape::PayloadShape;
use payload::unwrap::{decode, unwrap};
use records::model::CanonicalRecord;
use records::normalize::normalize;
use report::model::{FeedReport, ToolInfo};

pub const TOOL_NAME: &str = "callfeed";

/// JSON schema version of feed reports.
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Run decode → unwrap → normalize → select over raw payload bytes.
pub fn process(
    bytes: &[u8],
    config: &PipelineConfig,
) -> Result<Vec<CanonicalRecord>, PipelineError> {
    process_with_shape(bytes, config).1
}

/// Like [`process`], also reporting the outer wire shape once decoded.
fn process_with_shape(
    bytes: &[u8],
    config: &PipelineConfig,
) -> (Option<PayloadShape>, Result<Vec<CanonicalRecord>, PipelineError>) {
    let raw = match decode(bytes) {
        Ok(raw) => raw,
        Err(err) => return (None, Err(err)),
    };

    let shape = PayloadShape::of(&raw);
    let result = unwrap(raw, config.strict_envelope).map(|value| {
        let records = normalize(&value);
        tracing::debug!(%shape, items = records.len(), "normalized payload");
        select::select(records, config.limit)
    });

    (Some(shape), result)
}

/// Perform one load cycle.
///
/// Never fails: transport and payload errors are folded into the report's
/// outcome so the presenter can show the error state.
pub async fn load<F: Fetch>(fetcher: &F, config: &PipelineConfig, tool: ToolInfo) -> FeedReport {
    let payload = match fetcher.fetch().await {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(source = %fetcher.describe(), error = %err, "fetch failed");
            return FeedReport::new(tool, None, Err(err));
        }
    };

    let (shape, result) = process_with_shape(&payload.bytes, config);
    match &result {
        Ok(records) => tracing::debug!(selected = records.len(), "load cycle complete"),
        Err(err) => tracing::warn!(source = %payload.source, error = %err, "payload rejected"),
    }

    FeedReport::new(tool, Some(payload.info(shape)), result)
}
