//! Static SVG preview of the reading chart.

use crate::chart::resolve_annotations;
use crate::interpolate::RollingSeries;
use crate::traits::GraphRenderer;
use booklog_common::{BooklogError, Result};
use booklog_config::ChartConfig;
use chrono::Duration;
use plotters::prelude::*;
use std::fmt::Display;

const LINE_COLOR: RGBColor = RGBColor(76, 114, 176);
const PLOT_BACKGROUND: RGBColor = RGBColor(234, 234, 242);
const MARKER_COLOR: RGBColor = RGBColor(196, 78, 82);

/// Draws the rolling average as a static SVG line chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPreviewRenderer;

impl GraphRenderer for SvgPreviewRenderer {
    fn render(&self, series: &RollingSeries, config: &ChartConfig) -> Result<Vec<u8>> {
        let Some(first) = series.first() else {
            return Err(BooklogError::graph("No reading data to draw"));
        };
        let start = first.date;
        let annotations =
            resolve_annotations(series, &config.annotations, config.annotation_policy)?;

        #[allow(clippy::cast_precision_loss)]
        let x_max = series.len().saturating_sub(1).max(1) as f64;
        let y_max = series
            .points()
            .iter()
            .map(|point| point.plotted_value())
            .fold(0.0_f64, f64::max)
            .max(1.0)
            * 1.1;

        let date_label = |x: &f64| {
            #[allow(clippy::cast_possible_truncation)]
            let offset = x.round() as i64;
            (start + Duration::days(offset)).format("%Y-%m").to_string()
        };

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.preview_width, config.preview_height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, ("sans-serif", 24).into_font())
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(0.0..x_max, 0.0..y_max)
                .map_err(draw_error)?;

            chart
                .plotting_area()
                .fill(&PLOT_BACKGROUND)
                .map_err(draw_error)?;

            chart
                .configure_mesh()
                .light_line_style(WHITE)
                .bold_line_style(WHITE)
                .x_labels(8)
                .x_label_formatter(&date_label)
                .y_desc(config.y_axis_title.as_str())
                .draw()
                .map_err(draw_error)?;

            #[allow(clippy::cast_precision_loss)]
            let line: Vec<(f64, f64)> = series
                .points()
                .iter()
                .enumerate()
                .map(|(index, point)| (index as f64, point.plotted_value()))
                .collect();
            chart
                .draw_series(LineSeries::new(line, LINE_COLOR.stroke_width(2)))
                .map_err(draw_error)?;

            let markers = annotations.iter().filter_map(|annotation| {
                #[allow(clippy::cast_precision_loss)]
                let x = series.index_of(annotation.date)? as f64;
                Some(
                    EmptyElement::at((x, annotation.y))
                        + Circle::new((0, 0), 4, MARKER_COLOR.filled())
                        + Text::new(
                            annotation.label.clone(),
                            (6, -18),
                            ("sans-serif", 14).into_font(),
                        ),
                )
            });
            chart.draw_series(markers).map_err(draw_error)?;

            root.present().map_err(draw_error)?;
        }

        Ok(svg.into_bytes())
    }

    fn name(&self) -> &'static str {
        "reading_preview"
    }

    fn description(&self) -> &'static str {
        "Static SVG rendering of the rolling pages-per-day line"
    }
}

fn draw_error(err: impl Display) -> BooklogError {
    BooklogError::graph(format!("Failed to draw preview: {err}"))
}
