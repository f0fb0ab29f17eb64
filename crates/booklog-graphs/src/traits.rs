//! Graph renderer trait definitions for the chart outputs.

use crate::interpolate::RollingSeries;
use booklog_common::Result;
use booklog_config::ChartConfig;

/// Trait for renderers that turn the reading series into a file's bytes.
pub trait GraphRenderer {
    /// Renders the series with the given chart configuration.
    fn render(&self, series: &RollingSeries, config: &ChartConfig) -> Result<Vec<u8>>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;

    /// Gets the description of this renderer.
    fn description(&self) -> &'static str;
}
