//! One full run: fetch, tabulate, chart, report.

use crate::error::AppResult;
use booklog_common::Diagnostics;
use booklog_config::Config;
use booklog_graphs::{
    interpolate_pages_over_time, GraphRenderer, HtmlChartRenderer, SvgPreviewRenderer,
};
use booklog_notion::{build_table, fetch_all_pages, NotionClient, PageSource};
use booklog_report::{open_in_browser, render_report, render_table, PostLinks, ReportWriter};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn, Level};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Result pages fetched
    pub pages: usize,
    /// Finished books in the table
    pub rows: usize,
    /// Records that were not finished books
    pub filtered: usize,
    /// Records dropped as unreadable
    pub incomplete: usize,
    /// Days covered by the chart
    pub days: usize,
    /// Where the chart was written
    pub chart_path: PathBuf,
    /// Where the Markdown table was written
    pub table_path: PathBuf,
    /// Where the SVG preview was written, if configured
    pub preview_path: Option<PathBuf>,
}

/// Runs the reading-log update against a configuration.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    config: &'a Config,
    diagnostics: Diagnostics,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline; `diagnostics` controls record and table dumps.
    pub const fn new(config: &'a Config, diagnostics: Diagnostics) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    /// Run against the live Notion API.
    pub async fn run(&self) -> AppResult<RunSummary> {
        let client = NotionClient::new(self.config.notion.clone())?;
        self.run_with_source(&client).await
    }

    /// Run against any page source.
    #[instrument(skip_all, fields(database_id = %self.config.notion.database_id))]
    pub async fn run_with_source<S>(&self, source: &S) -> AppResult<RunSummary>
    where
        S: PageSource + ?Sized,
    {
        let pages = fetch_all_pages(source, &self.config.notion.database_id).await?;
        let build = build_table(&pages, self.diagnostics);

        if self.diagnostics.is_verbose() && tracing::enabled!(Level::DEBUG) {
            let links = PostLinks::from_config(&self.config.report);
            debug!("Reading table:\n{}", render_table(&build.table, &links));
        }

        let chart_config = &self.config.chart;
        let series =
            interpolate_pages_over_time(build.table.ascending(), chart_config.rolling_window);
        let writer = ReportWriter::new(&self.config.output);

        let chart = HtmlChartRenderer.render(&series, chart_config)?;
        let chart_path = writer.write_chart(&chart)?;

        let preview_path = if !writer.wants_preview() {
            None
        } else if series.is_empty() {
            warn!("No finished books, skipping chart preview");
            None
        } else {
            let svg = SvgPreviewRenderer.render(&series, chart_config)?;
            writer.write_preview(&svg)?
        };

        let report = render_report(&build.table, &self.config.report);
        let table_path = writer.write_table(&report)?;

        if chart_config.open_in_browser {
            open_in_browser(chart_path);
        }

        let summary = RunSummary {
            pages: pages.len(),
            rows: build.table.len(),
            filtered: build.filtered,
            incomplete: build.incomplete.len(),
            days: series.len(),
            chart_path: chart_path.to_path_buf(),
            table_path: table_path.to_path_buf(),
            preview_path: preview_path.map(std::path::Path::to_path_buf),
        };
        info!(
            rows = summary.rows,
            incomplete = summary.incomplete,
            days = summary.days,
            "Reading log updated"
        );

        Ok(summary)
    }
}
