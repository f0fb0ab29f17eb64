//! Configuration schema definitions using serde.

use booklog_common::LoggingConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for booklog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Notion API configuration.
    pub notion: NotionConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
    /// Output file locations.
    pub output: OutputConfig,
    /// Markdown report configuration.
    pub report: ReportConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Notion API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration token.
    pub token: String,
    /// Reading-log database identifier.
    pub database_id: String,
    /// API base URL.
    pub api_url: String,
    /// Value sent in the `Notion-Version` header.
    pub api_version: String,
    /// Records requested per page (Notion caps this at 100).
    pub page_size: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// What to do with an annotation whose date the series does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationPolicy {
    /// Abort the run.
    #[default]
    Error,
    /// Drop the annotation with a warning.
    Skip,
    /// Pin the annotation to the nearest end of the series.
    Clamp,
}

/// A dated text marker on the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Day the marker points at.
    pub date: NaiveDate,
    /// Marker text.
    pub label: String,
}

impl AnnotationConfig {
    /// Create an annotation.
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
        }
    }
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// Y-axis label.
    pub y_axis_title: String,
    /// Rolling-average window in days.
    pub rolling_window: usize,
    /// Life-event markers.
    pub annotations: Vec<AnnotationConfig>,
    /// Handling of annotations outside the series.
    pub annotation_policy: AnnotationPolicy,
    /// Write a complete HTML document instead of an embeddable fragment.
    pub full_html: bool,
    /// Element id of the chart container.
    pub div_id: String,
    /// Plotly.js script location.
    pub plotly_cdn_url: String,
    /// Open the written chart with the platform opener.
    pub open_in_browser: bool,
    /// Width of the static SVG preview in pixels.
    pub preview_width: u32,
    /// Height of the static SVG preview in pixels.
    pub preview_height: u32,
}

/// Output file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Interactive chart (HTML).
    pub graphic: PathBuf,
    /// Markdown report.
    pub table: PathBuf,
    /// Optional static SVG preview of the chart.
    pub preview_svg: Option<PathBuf>,
}

/// Markdown report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Prefix placed before a post slug when linking a title.
    pub post_url_prefix: String,
    /// Exact book title to blog post slug.
    pub book_posts: BTreeMap<String, String>,
    /// Text written before the table.
    pub header: String,
    /// Text written after the table.
    pub footer: String,
}

impl Config {
    /// Validates the configuration, reporting every problem found.
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        crate::ConfigValidator::validate(self)
    }
}
