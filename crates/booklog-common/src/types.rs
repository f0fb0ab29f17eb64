//! Normalized reading-log rows and the table built from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One finished book, normalized from a Notion record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRow {
    /// Book title (first segment of the title property)
    pub title: String,
    /// First listed author
    pub author: String,
    /// First day of reading
    pub start_date: NaiveDate,
    /// Last day of reading, never before `start_date`
    pub end_date: NaiveDate,
    /// Score label as entered, e.g. "⭐⭐⭐⭐"
    pub score: String,
    /// Total page count
    pub page_count: u32,
}

impl ReadingRow {
    /// Number of calendar days in `[start_date, end_date]`, inclusive.
    pub fn span_days(&self) -> u32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u32::try_from(days.max(1)).unwrap_or(u32::MAX)
    }

    /// Pages attributed to each day of the reading span.
    pub fn pages_per_day(&self) -> f64 {
        f64::from(self.page_count) / f64::from(self.span_days())
    }

    /// Hover label, "Title - Author".
    pub fn label(&self) -> String {
        format!("{} - {}", self.title, self.author)
    }
}

impl fmt::Display for ReadingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {}, {} pages)",
            self.label(),
            self.start_date,
            self.end_date,
            self.page_count
        )
    }
}

/// Complete reading rows ordered by end date.
///
/// Rows are kept ascending by end date (stable, so rows sharing an end date
/// keep their fetch order). The descending view is the exact reverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingTable {
    rows: Vec<ReadingRow>,
}

impl ReadingTable {
    /// Build a table, sorting the rows ascending by end date.
    pub fn from_rows(mut rows: Vec<ReadingRow>) -> Self {
        rows.sort_by_key(|row| row.end_date);
        Self { rows }
    }

    /// Rows in ascending end-date order, as the interpolator consumes them.
    pub fn ascending(&self) -> &[ReadingRow] {
        &self.rows
    }

    /// Rows in descending end-date order, as the report prints them.
    pub fn descending(&self) -> impl DoubleEndedIterator<Item = &ReadingRow> + ExactSizeIterator {
        self.rows.iter().rev()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

}

/// Earliest start date and latest end date across `rows`, if any.
pub fn date_bounds(rows: &[ReadingRow]) -> Option<(NaiveDate, NaiveDate)> {
    let first = rows.iter().map(|row| row.start_date).min()?;
    let last = rows.iter().map(|row| row.end_date).max()?;
    Some((first, last))
}
