//! Recency ordering and top-N selection.
//!
//! Records with an unparseable or empty `createdAt` rank below every
//! parseable timestamp, so they sink to the end of the list. Among equal
//! keys the input order is preserved.

pub mod timestamp;

use chrono::{DateTime, Utc};

use crate::records::model::CanonicalRecord;
use timestamp::parse_timestamp;

/// Sort key for a record. `None` orders before every `Some`.
fn recency_key(record: &CanonicalRecord) -> Option<DateTime<Utc>> {
    parse_timestamp(&record.created_at)
}

/// Sort by recency, most recent first. Stable.
pub fn sort_by_recency(records: &mut [CanonicalRecord]) {
    records.sort_by_cached_key(|r| std::cmp::Reverse(recency_key(r)));
}

/// Most recent `limit` records.
pub fn select(mut records: Vec<CanonicalRecord>, limit: usize) -> Vec<CanonicalRecord> {
    sort_by_recency(&mut records);
    records.truncate(limit);
    records
}
