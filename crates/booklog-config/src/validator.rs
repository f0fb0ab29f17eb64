//! Runtime validation of a loaded configuration.

use crate::defaults::MAX_PAGE_SIZE;
use crate::loader::ConfigError;
use crate::schema::Config;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, collecting every failed check.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = Self::problems(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }

    /// Every failed check, in section order.
    pub fn problems(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        let notion = &config.notion;
        if notion.token.trim().is_empty() {
            problems.push("notion.token cannot be empty".to_string());
        }
        if notion.database_id.trim().is_empty() {
            problems.push("notion.database_id cannot be empty".to_string());
        }
        if notion.api_url.trim().is_empty() {
            problems.push("notion.api_url cannot be empty".to_string());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&notion.page_size) {
            problems.push(format!(
                "notion.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                notion.page_size
            ));
        }
        if notion.timeout_seconds == 0 {
            problems.push("notion.timeout_seconds must be greater than 0".to_string());
        }

        let chart = &config.chart;
        if chart.rolling_window == 0 {
            problems.push("chart.rolling_window must be at least 1".to_string());
        }
        for annotation in &chart.annotations {
            if annotation.label.trim().is_empty() {
                problems.push(format!("chart.annotations entry at {} has an empty label", annotation.date));
            }
        }
        if chart.preview_width == 0 || chart.preview_height == 0 {
            problems.push("chart.preview_width and chart.preview_height must be non-zero".to_string());
        }

        if config.output.graphic.as_os_str().is_empty() {
            problems.push("output.graphic cannot be empty".to_string());
        }
        if config.output.table.as_os_str().is_empty() {
            problems.push("output.table cannot be empty".to_string());
        }

        for (title, slug) in &config.report.book_posts {
            if slug.trim().is_empty() {
                problems.push(format!("report.book_posts entry '{title}' has an empty slug"));
            }
        }

        problems
    }
}
