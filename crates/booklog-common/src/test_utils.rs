//! Test utilities and shared fixtures for booklog.
//!
//! Available to other workspace crates through the `testing` feature.

use crate::types::ReadingRow;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// A reading row with a fixed score.
pub fn reading_row(
    title: &str,
    author: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    page_count: u32,
) -> ReadingRow {
    ReadingRow {
        title: title.to_string(),
        author: author.to_string(),
        start_date,
        end_date,
        score: "⭐⭐⭐⭐".to_string(),
        page_count,
    }
}

/// The two overlapping books used across end-to-end tests.
pub fn overlapping_rows() -> Vec<ReadingRow> {
    vec![
        reading_row("A", "X", date(2021, 1, 1), date(2021, 1, 5), 100),
        reading_row("B", "Y", date(2021, 1, 3), date(2021, 1, 10), 80),
    ]
}

/// Builder for Notion database pages shaped like the query endpoint returns them.
#[derive(Debug, Clone)]
pub struct NotionPageFixture {
    id: String,
    status: Option<String>,
    content_type: Option<String>,
    title: Option<String>,
    author: Option<String>,
    start: Option<String>,
    end: Option<String>,
    score: Option<String>,
    pages: Value,
}

impl NotionPageFixture {
    /// A finished book with every property filled in.
    pub fn finished_book(title: &str, author: &str, start: &str, end: &str, pages: u32) -> Self {
        Self {
            id: format!("page-{}", title.to_lowercase().replace(' ', "-")),
            status: Some("Finished".to_string()),
            content_type: Some("Book".to_string()),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            score: Some("⭐⭐⭐⭐".to_string()),
            pages: json!(pages),
        }
    }

    /// Override the status select.
    pub fn status(mut self, status: Option<&str>) -> Self {
        self.status = status.map(str::to_string);
        self
    }

    /// Override the content-type select.
    pub fn content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = content_type.map(str::to_string);
        self
    }

    /// Override the author multi-select (`None` leaves it empty).
    pub fn author(mut self, author: Option<&str>) -> Self {
        self.author = author.map(str::to_string);
        self
    }

    /// Override the title (`None` leaves it empty).
    pub fn title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    /// Override the end of the date range.
    pub fn end(mut self, end: Option<&str>) -> Self {
        self.end = end.map(str::to_string);
        self
    }

    /// Override the raw `Page Length.number` value.
    pub fn pages(mut self, pages: Value) -> Self {
        self.pages = pages;
        self
    }

    /// Render the page JSON.
    pub fn to_json(&self) -> Value {
        let select = |name: &Option<String>| match name {
            Some(name) => json!({ "type": "select", "select": { "name": name } }),
            None => json!({ "type": "select", "select": null }),
        };
        let author = self
            .author
            .iter()
            .map(|name| json!({ "name": name }))
            .collect::<Vec<_>>();
        let title = self
            .title
            .iter()
            .map(|text| json!({ "type": "text", "plain_text": text }))
            .collect::<Vec<_>>();

        json!({
            "object": "page",
            "id": self.id,
            "properties": {
                "Status": select(&self.status),
                "Content Type": select(&self.content_type),
                "Score /5": select(&self.score),
                "Dates": {
                    "type": "date",
                    "date": { "start": self.start, "end": self.end, "time_zone": null }
                },
                "Page Length": { "type": "number", "number": self.pages },
                "Author": { "type": "multi_select", "multi_select": author },
                "Name": { "type": "title", "title": title }
            }
        })
    }
}
