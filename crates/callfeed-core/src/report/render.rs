//! Presenters for a [`FeedReport`].

use anyhow::Result;
use chrono::{DateTime, Local, Utc};

use crate::TOOL_NAME;
use crate::records::model::CanonicalRecord;
use crate::report::model::{FeedReport, Outcome};
use crate::select::timestamp::parse_timestamp;

/// Labels for the three candidate slots, in order.
pub const SLOT_LABELS: [&str; 3] = ["Top match", "Option 2", "Option 3"];

/// Shown for empty slots and missing times.
pub const PLACEHOLDER: &str = "—";

pub const EMPTY_MESSAGE: &str = "No calls yet.";

const TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

pub trait Presenter {
    fn render(&self, report: &FeedReport) -> Result<String>;
}

/// Zone used for human-readable times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    #[default]
    Utc,
    Local,
}

/// Format a record timestamp for display.
///
/// Unparseable input is returned verbatim; empty input shows the placeholder.
pub fn format_time(raw: &str, zone: DisplayZone) -> String {
    if raw.trim().is_empty() {
        return PLACEHOLDER.to_string();
    }
    match parse_timestamp(raw) {
        Some(dt) => format_instant(dt, zone),
        None => raw.to_string(),
    }
}

fn format_instant(dt: DateTime<Utc>, zone: DisplayZone) -> String {
    match zone {
        DisplayZone::Utc => dt.format(TIME_FORMAT).to_string(),
        DisplayZone::Local => dt.with_timezone(&Local).format(TIME_FORMAT).to_string(),
    }
}

/// Plain-text list of recent calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPresenter {
    pub zone: DisplayZone,
}

impl TextPresenter {
    fn render_record(&self, out: &mut String, record: &CanonicalRecord) {
        out.push_str(&format!(
            "{}  {}\n",
            record.caller_label,
            format_time(&record.created_at, self.zone)
        ));
        for (i, label) in SLOT_LABELS.iter().enumerate() {
            let value = record
                .candidates
                .get(i)
                .map(String::as_str)
                .unwrap_or(PLACEHOLDER);
            out.push_str(&format!("  {label:<9}  {value}\n"));
        }
    }
}

impl Presenter for TextPresenter {
    fn render(&self, report: &FeedReport) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!("{} {}\n", TOOL_NAME, report.tool.version));

        match &report.outcome {
            Outcome::Failed { message, .. } => {
                out.push_str(&format!("Couldn't load recent calls ({message}).\n"));
            }
            Outcome::Loaded { records } if records.is_empty() => {
                out.push_str(EMPTY_MESSAGE);
                out.push('\n');
            }
            Outcome::Loaded { records } => {
                out.push_str(&format!("Updated {}\n", format_time(&report.fetched_at, self.zone)));
                for record in records {
                    out.push('\n');
                    self.render_record(&mut out, record);
                }
            }
        }
        Ok(out)
    }
}

/// The report as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPresenter {
    pub pretty: bool,
}

impl Presenter for JsonPresenter {
    fn render(&self, report: &FeedReport) -> Result<String> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        out.push('\n');
        Ok(out)
    }
}
