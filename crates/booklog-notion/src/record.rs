//! Parsing of raw Notion pages into reading rows.
//!
//! Property shapes vary by type (select, multi-select, date, number, title)
//! and any of them may be missing or null. Instead of failing the run, a
//! record that cannot be fully read comes back as
//! [`ParseOutcome::Incomplete`] listing every field that was missing or
//! malformed, and the table builder drops it.

use crate::RawRecord;
use booklog_common::{Diagnostics, ReadingRow};
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Status select property.
pub const STATUS: &str = "Status";
/// Content-type select property.
pub const CONTENT_TYPE: &str = "Content Type";
/// Score select property.
pub const SCORE: &str = "Score /5";
/// Reading date-range property.
pub const DATES: &str = "Dates";
/// Page count number property.
pub const PAGE_LENGTH: &str = "Page Length";
/// Author multi-select property.
pub const AUTHOR: &str = "Author";
/// Title property.
pub const NAME: &str = "Name";

/// Status a record must have to be reported.
pub const FINISHED_STATUS: &str = "Finished";
/// Content types that are reported.
pub const INCLUDED_CONTENT_TYPES: [&str; 2] = ["Book", "Audiobook"];

/// Why a well-formed record was left out of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterReason {
    /// Status other than "Finished"
    Status(String),
    /// Content type outside the included set
    ContentType(String),
}

/// A field that could not be read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// The property, or the value inside it, is absent or null
    Missing {
        /// Property path, e.g. "Dates.end"
        field: &'static str,
    },
    /// The value is present but has the wrong shape
    Malformed {
        /// Property path
        field: &'static str,
        /// What was found
        detail: String,
    },
    /// The reading span ends before it starts
    InvalidDateRange {
        /// Parsed start date
        start: NaiveDate,
        /// Parsed end date
        end: NaiveDate,
    },
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} is missing"),
            Self::Malformed { field, detail } => write!(f, "{field} is malformed: {detail}"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "{DATES} ends ({end}) before it starts ({start})")
            }
        }
    }
}

/// A record that could not be turned into a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteRecord {
    /// Notion page id, when the record carried one
    pub record_id: Option<String>,
    /// Every problem found
    pub issues: Vec<FieldIssue>,
}

impl IncompleteRecord {
    /// Issues joined for a single log line.
    pub fn summary(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Result of parsing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A finished book with every field present
    Row(ReadingRow),
    /// Not a finished book; dropped silently
    Filtered(FilterReason),
    /// Could not be read; dropped with a warning
    Incomplete(IncompleteRecord),
}

type FieldResult<T> = Result<T, FieldIssue>;

/// Parse one raw record.
pub fn parse_record(raw: &RawRecord, diagnostics: Diagnostics) -> ParseOutcome {
    let record_id = raw.get("id").and_then(Value::as_str).map(str::to_string);

    let Some(props) = raw.get("properties").and_then(Value::as_object) else {
        return ParseOutcome::Incomplete(IncompleteRecord {
            record_id,
            issues: vec![FieldIssue::Missing { field: "properties" }],
        });
    };

    if diagnostics.is_verbose() {
        debug!(
            record_id = record_id.as_deref().unwrap_or("-"),
            properties = %serde_json::to_string_pretty(props).unwrap_or_default(),
            "Raw record"
        );
    }

    match (select_name(props, STATUS), select_name(props, CONTENT_TYPE)) {
        (Ok(status), _) if status != FINISHED_STATUS => {
            return ParseOutcome::Filtered(FilterReason::Status(status.to_string()));
        }
        (Ok(_), Ok(content_type)) if !INCLUDED_CONTENT_TYPES.contains(&content_type) => {
            return ParseOutcome::Filtered(FilterReason::ContentType(content_type.to_string()));
        }
        (Ok(_), Ok(_)) => {}
        (status, content_type) => {
            let issues = [status.err(), content_type.err()].into_iter().flatten().collect();
            return ParseOutcome::Incomplete(IncompleteRecord { record_id, issues });
        }
    }

    let mut issues = Vec::new();
    let score = keep(&mut issues, select_name(props, SCORE).map(str::to_string));
    let start_date = keep(&mut issues, date_field(props, "/date/start", "Dates.start"));
    let end_date = keep(&mut issues, date_field(props, "/date/end", "Dates.end"));
    let page_count = keep(&mut issues, page_count(props));
    let author = keep(&mut issues, first_text(props, AUTHOR, "/multi_select/0/name"));
    let title = keep(&mut issues, first_text(props, NAME, "/title/0/plain_text"));

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if start > end {
            issues.push(FieldIssue::InvalidDateRange { start, end });
        }
    }

    match (title, author, start_date, end_date, score, page_count) {
        (Some(title), Some(author), Some(start_date), Some(end_date), Some(score), Some(page_count))
            if issues.is_empty() =>
        {
            ParseOutcome::Row(ReadingRow {
                title,
                author,
                start_date,
                end_date,
                score,
                page_count,
            })
        }
        _ => ParseOutcome::Incomplete(IncompleteRecord { record_id, issues }),
    }
}

fn keep<T>(issues: &mut Vec<FieldIssue>, result: FieldResult<T>) -> Option<T> {
    result.map_err(|issue| issues.push(issue)).ok()
}

fn value_at<'a>(
    props: &'a Map<String, Value>,
    key: &str,
    pointer: &str,
    field: &'static str,
) -> FieldResult<&'a Value> {
    props
        .get(key)
        .and_then(|property| property.pointer(pointer))
        .filter(|value| !value.is_null())
        .ok_or(FieldIssue::Missing { field })
}

fn text_at<'a>(
    props: &'a Map<String, Value>,
    key: &str,
    pointer: &str,
    field: &'static str,
) -> FieldResult<&'a str> {
    let value = value_at(props, key, pointer, field)?;
    value.as_str().ok_or_else(|| FieldIssue::Malformed {
        field,
        detail: format!("expected text, found {value}"),
    })
}

fn select_name<'a>(props: &'a Map<String, Value>, key: &'static str) -> FieldResult<&'a str> {
    text_at(props, key, "/select/name", key)
}

fn first_text(props: &Map<String, Value>, key: &'static str, pointer: &str) -> FieldResult<String> {
    text_at(props, key, pointer, key).map(str::to_string)
}

fn date_field(props: &Map<String, Value>, pointer: &str, field: &'static str) -> FieldResult<NaiveDate> {
    let raw = text_at(props, DATES, pointer, field)?;
    parse_notion_date(raw).ok_or_else(|| FieldIssue::Malformed {
        field,
        detail: format!("'{raw}' is not a date"),
    })
}

/// Parse a Notion date value, either `YYYY-MM-DD` or an RFC 3339 date-time.
///
/// Date-times keep the calendar date in their own offset.
pub fn parse_notion_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn page_count(props: &Map<String, Value>) -> FieldResult<u32> {
    let field = "Page Length";
    let value = value_at(props, PAGE_LENGTH, "/number", field)?;
    let number = value.as_f64().ok_or_else(|| FieldIssue::Malformed {
        field,
        detail: format!("expected a number, found {value}"),
    })?;

    if !number.is_finite() || number < 0.0 || number > f64::from(u32::MAX) {
        return Err(FieldIssue::Malformed {
            field,
            detail: format!("{number} is not a valid page count"),
        });
    }

    // Fractional page counts are truncated, as they were entered by hand.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pages = number.trunc() as u32;
    Ok(pages)
}
