//! Default values for every configuration section.

use crate::schema::*;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Notion API base URL.
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com/v1";

/// Notion API version the record parser understands.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Largest page size the query endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default rolling-average window in days.
pub const DEFAULT_ROLLING_WINDOW: usize = 7;

/// Plotly.js bundle referenced by the chart.
pub const DEFAULT_PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_url: DEFAULT_NOTION_API_URL.to_string(),
            api_version: DEFAULT_NOTION_VERSION.to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout_seconds: 30,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "My Reading Over Time".to_string(),
            y_axis_title: "Average Pages per Day (rolling)".to_string(),
            rolling_window: DEFAULT_ROLLING_WINDOW,
            annotations: default_annotations(),
            annotation_policy: AnnotationPolicy::Error,
            full_html: false,
            div_id: "reading-chart".to_string(),
            plotly_cdn_url: DEFAULT_PLOTLY_CDN_URL.to_string(),
            open_in_browser: false,
            preview_width: 1200,
            preview_height: 500,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graphic: PathBuf::from("static/reading_chart.html"),
            table: PathBuf::from("content/books.md"),
            preview_svg: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            post_url_prefix: "/posts/".to_string(),
            book_posts: BTreeMap::new(),
            header: concat!(
                "---\n",
                "title: \"Books\"\n",
                "layout: page\n",
                "---\n",
                "\n",
                "Every book and audiobook I have finished, most recent first.\n",
                "Titles link to a post when I wrote one.\n",
                "\n",
            )
            .to_string(),
            footer: "\n".to_string(),
        }
    }
}

/// Life events marked on the chart by default.
pub fn default_annotations() -> Vec<AnnotationConfig> {
    [
        ((2022, 5, 1), "Slovak Shield"),
        ((2021, 5, 1), "Master's Thesis"),
        ((2020, 3, 10), "Coronavirus"),
        ((2019, 7, 23), "Boston Move"),
        ((2018, 7, 13), "Poland"),
    ]
    .into_iter()
    .filter_map(|((year, month, day), label)| {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| AnnotationConfig::new(date, label))
    })
    .collect()
}
