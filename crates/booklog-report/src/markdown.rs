//! Markdown pipe table of finished books, most recent first.
//!
//! Layout matches tabulate's `pipe` format: every column is left-aligned,
//! padded to the wider of its longest cell and its header plus two, and the
//! separator row marks alignment with a leading colon.

use booklog_common::{ReadingRow, ReadingTable};
use booklog_config::ReportConfig;
use std::collections::BTreeMap;

/// Column headers, in output order.
pub const COLUMNS: [&str; 5] = ["Title", "Author", "Start Date", "End Date", "Score"];

const HEADER_PADDING: usize = 2;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maps book titles to blog post links.
#[derive(Debug, Clone, Copy)]
pub struct PostLinks<'a> {
    prefix: &'a str,
    posts: &'a BTreeMap<String, String>,
}

impl<'a> PostLinks<'a> {
    /// Links titles found in `posts` to `<prefix><slug>`.
    pub const fn new(prefix: &'a str, posts: &'a BTreeMap<String, String>) -> Self {
        Self { prefix, posts }
    }

    /// Links as configured for the report.
    pub fn from_config(config: &'a ReportConfig) -> Self {
        Self::new(config.post_url_prefix.as_str(), &config.book_posts)
    }

    /// The title as Markdown link when a post exists, otherwise unchanged.
    pub fn link(&self, title: &str) -> String {
        match self.posts.get(title) {
            Some(slug) => format!("[{title}]({}{slug})", self.prefix),
            None => title.to_string(),
        }
    }
}

/// Render the table, most recently finished first.
pub fn render_table(table: &ReadingTable, links: &PostLinks<'_>) -> String {
    let rows: Vec<[String; 5]> = table.descending().map(|row| cells(row, links)).collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .map(|row| display_width(&row[column]))
                .chain(std::iter::once(display_width(header) + HEADER_PADDING))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(COLUMNS.iter().copied(), &widths));
    lines.push(separator_line(&widths));
    for row in &rows {
        lines.push(format_line(row.iter().map(String::as_str), &widths));
    }

    lines.join("\n")
}

/// The full Markdown page: header, table, footer.
pub fn render_report(table: &ReadingTable, config: &ReportConfig) -> String {
    let links = PostLinks::from_config(config);
    format!(
        "{}{}{}",
        config.header,
        render_table(table, &links),
        config.footer
    )
}

fn cells(row: &ReadingRow, links: &PostLinks<'_>) -> [String; 5] {
    [
        escape_cell(&links.link(&row.title)),
        escape_cell(&row.author),
        row.start_date.format(DATE_FORMAT).to_string(),
        row.end_date.format(DATE_FORMAT).to_string(),
        escape_cell(&row.score),
    ]
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let body: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!(" {cell:<width$} "))
        .collect();
    format!("|{}|", body.join("|"))
}

fn separator_line(widths: &[usize]) -> String {
    let body: Vec<String> = widths
        .iter()
        .map(|width| format!(":{}", "-".repeat(width + 1)))
        .collect();
    format!("|{}|", body.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklog_common::test_utils::{date, overlapping_rows, reading_row};
    use pretty_assertions::assert_eq;

    fn posts(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(title, slug)| ((*title).to_string(), (*slug).to_string()))
            .collect()
    }

    #[test]
    fn test_post_links() {
        let posts = posts(&[("Dune", "dune-review")]);
        let links = PostLinks::new("/posts/", &posts);

        assert_eq!(links.link("Dune"), "[Dune](/posts/dune-review)");
        assert_eq!(links.link("dune"), "dune");
        assert_eq!(links.link("Emma"), "Emma");
    }

    #[test]
    fn test_render_table_layout() {
        let table = ReadingTable::from_rows(overlapping_rows());
        let posts = posts(&[("B", "b-post")]);

        let rendered = render_table(&table, &PostLinks::new("/posts/", &posts));

        let expected = concat!(
            "| Title              | Author   | Start Date   | End Date   | Score   |\n",
            "|:-------------------|:---------|:-------------|:-----------|:--------|\n",
            "| [B](/posts/b-post) | Y        | 2021-01-03   | 2021-01-10 | ⭐⭐⭐⭐    |\n",
            "| A                  | X        | 2021-01-01   | 2021-01-05 | ⭐⭐⭐⭐    |",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_table() {
        let posts = BTreeMap::new();
        let rendered = render_table(&ReadingTable::default(), &PostLinks::new("/posts/", &posts));

        assert_eq!(
            rendered,
            concat!(
                "| Title   | Author   | Start Date   | End Date   | Score   |\n",
                "|:--------|:---------|:-------------|:-----------|:--------|",
            )
        );
    }

    #[test]
    fn test_pipes_are_escaped() {
        let table = ReadingTable::from_rows(vec![reading_row(
            "Either | Or",
            "Kierkegaard",
            date(2020, 2, 1),
            date(2020, 3, 1),
            600,
        )]);
        let posts = BTreeMap::new();

        let rendered = render_table(&table, &PostLinks::new("/posts/", &posts));
        let row = rendered.lines().nth(2).unwrap();

        assert!(row.starts_with("| Either \\| Or "));
        assert_eq!(row.matches('|').count(), 7);
    }

    #[test]
    fn test_report_wraps_header_and_footer() {
        let table = ReadingTable::from_rows(overlapping_rows());
        let config = ReportConfig {
            header: "# Books\n\n".to_string(),
            footer: "\n<!-- end -->\n".to_string(),
            ..ReportConfig::default()
        };

        let report = render_report(&table, &config);

        assert!(report.starts_with("# Books\n\n| Title "));
        assert!(report.ends_with("|\n<!-- end -->\n"));
        assert!(!report.contains("100"));
    }
}
