//! Integration tests for the booklog crate.
//!
//! These tests run the whole pipeline against an in-memory page source and
//! check the files it leaves behind.

use async_trait::async_trait;
use booklog::{AppError, Pipeline};
use booklog_common::test_utils::{date, init_test_logging, NotionPageFixture};
use booklog_common::{BooklogError, Diagnostics, Result};
use booklog_config::{AnnotationConfig, AnnotationPolicy, Config};
use booklog_notion::{PageSource, QueryPage, RawRecord};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Serves fixed pages keyed by their position, using the index as cursor.
struct StaticPages(Vec<Vec<RawRecord>>);

#[async_trait]
impl PageSource for StaticPages {
    async fn query_page(&self, _database_id: &str, cursor: Option<String>) -> Result<QueryPage> {
        let index = cursor.and_then(|c| c.parse::<usize>().ok()).unwrap_or(0);
        let has_more = index + 1 < self.0.len();
        Ok(QueryPage {
            results: self.0.get(index).cloned().unwrap_or_default(),
            has_more,
            next_cursor: has_more.then(|| (index + 1).to_string()),
        })
    }
}

/// A source whose every request is rejected.
struct Unauthorized;

#[async_trait]
impl PageSource for Unauthorized {
    async fn query_page(&self, _database_id: &str, _cursor: Option<String>) -> Result<QueryPage> {
        Err(BooklogError::notion_with_status("unauthorized: API token is invalid.", 401))
    }
}

fn two_books() -> StaticPages {
    StaticPages(vec![
        vec![NotionPageFixture::finished_book("B", "Y", "2021-01-03", "2021-01-10", 80).to_json()],
        vec![
            NotionPageFixture::finished_book("A", "X", "2021-01-01", "2021-01-05", 100).to_json(),
            NotionPageFixture::finished_book("Abandoned", "Z", "2021-01-02", "2021-01-04", 50)
                .status(Some("Dropped"))
                .to_json(),
            NotionPageFixture::finished_book("No pages", "Z", "2021-01-02", "2021-01-04", 1)
                .pages(serde_json::Value::Null)
                .to_json(),
        ],
    ])
}

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.notion.token = "secret".to_string();
    config.notion.database_id = "db".to_string();
    config.output.graphic = dir.join("static/reading_chart.html");
    config.output.table = dir.join("content/books.md");
    config.output.preview_svg = Some(dir.join("static/reading_chart.svg"));
    config.chart.annotations = vec![AnnotationConfig::new(date(2021, 1, 4), "Holiday")];
    config.report.book_posts.insert("B".to_string(), "b-post".to_string());
    config.report.header = "# Books\n\n".to_string();
    config.report.footer = "\n".to_string();
    config
}

#[tokio::test]
async fn test_pipeline_writes_every_output() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let summary = Pipeline::new(&config, Diagnostics::Verbose)
        .run_with_source(&two_books())
        .await
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.filtered, 1);
    assert_eq!(summary.incomplete, 1);
    assert_eq!(summary.days, 10);
    assert_eq!(summary.chart_path, config.output.graphic);
    assert_eq!(summary.preview_path, config.output.preview_svg);

    let chart = fs::read_to_string(&config.output.graphic).unwrap();
    assert!(chart.contains("Plotly.newPlot"));
    assert!(chart.contains("Holiday"));
    assert!(chart.contains("\"2021-01-10\""));

    let svg = fs::read_to_string(dir.path().join("static/reading_chart.svg")).unwrap();
    assert!(svg.contains("<svg"));

    let table = fs::read_to_string(&config.output.table).unwrap();
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines[0], "# Books");
    assert!(lines[2].starts_with("| Title"));
    assert!(lines[4].starts_with("| [B](/posts/b-post) | Y "));
    assert!(lines[5].starts_with("| A "));
    assert_eq!(lines.len(), 6);
    assert!(table.ends_with("|\n"));
}

#[tokio::test]
async fn test_pipeline_overwrites_previous_run() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.output.preview_svg = None;
    fs::create_dir_all(dir.path().join("content")).unwrap();
    fs::write(&config.output.table, "stale contents ".repeat(500)).unwrap();

    let summary = Pipeline::new(&config, Diagnostics::Standard)
        .run_with_source(&two_books())
        .await
        .unwrap();

    assert_eq!(summary.preview_path, None);
    let table = fs::read_to_string(&config.output.table).unwrap();
    assert!(!table.contains("stale"));
}

#[tokio::test]
async fn test_annotation_outside_series_aborts_by_default() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.chart.annotations = vec![AnnotationConfig::new(date(2018, 7, 13), "Poland")];

    let err = Pipeline::new(&config, Diagnostics::Standard)
        .run_with_source(&two_books())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Booklog(BooklogError::AnnotationOutOfRange { .. })
    ));
    assert!(!config.output.table.exists());

    config.chart.annotation_policy = AnnotationPolicy::Skip;
    let summary = Pipeline::new(&config, Diagnostics::Standard)
        .run_with_source(&two_books())
        .await
        .unwrap();
    assert_eq!(summary.rows, 2);
}

#[tokio::test]
async fn test_empty_log_still_writes_table() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.chart.annotations.clear();

    let summary = Pipeline::new(&config, Diagnostics::Standard)
        .run_with_source(&StaticPages(vec![Vec::new()]))
        .await
        .unwrap();

    assert_eq!(summary.rows, 0);
    assert_eq!(summary.days, 0);
    assert_eq!(summary.preview_path, None);
    let table = fs::read_to_string(&config.output.table).unwrap();
    assert_eq!(table.lines().count(), 4);
}

#[tokio::test]
async fn test_auth_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let err = Pipeline::new(&config, Diagnostics::Standard)
        .run_with_source(&Unauthorized)
        .await
        .unwrap_err();

    match err {
        AppError::Booklog(inner) => assert!(inner.is_auth_failure()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.output.graphic.exists());
    assert!(!config.output.table.exists());
}
