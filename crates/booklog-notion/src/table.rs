//! Assembly of fetched pages into the reading table.

use crate::record::{parse_record, IncompleteRecord, ParseOutcome};
use crate::RawRecord;
use booklog_common::{Diagnostics, ReadingTable};
use tracing::{debug, info, warn};

/// The table plus what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct TableBuild {
    /// Finished books, ascending by end date
    pub table: ReadingTable,
    /// Records that were not finished books
    pub filtered: usize,
    /// Records that could not be read
    pub incomplete: Vec<IncompleteRecord>,
}

/// Flatten fetched pages, parse every record, and keep the complete rows.
pub fn build_table(pages: &[Vec<RawRecord>], diagnostics: Diagnostics) -> TableBuild {
    let mut rows = Vec::new();
    let mut filtered = 0;
    let mut incomplete = Vec::new();

    for raw in pages.iter().flatten() {
        match parse_record(raw, diagnostics) {
            ParseOutcome::Row(row) => {
                if diagnostics.is_verbose() {
                    debug!(%row, "Parsed row");
                }
                rows.push(row);
            }
            ParseOutcome::Filtered(reason) => {
                debug!(?reason, "Record filtered out");
                filtered += 1;
            }
            ParseOutcome::Incomplete(record) => {
                warn!(
                    record_id = record.record_id.as_deref().unwrap_or("-"),
                    issues = %record.summary(),
                    raw = %raw,
                    "Dropping record that could not be parsed"
                );
                incomplete.push(record);
            }
        }
    }

    let table = ReadingTable::from_rows(rows);
    info!(
        rows = table.len(),
        filtered,
        incomplete = incomplete.len(),
        "Built reading table"
    );

    TableBuild {
        table,
        filtered,
        incomplete,
    }
}
