//! Interactive reading chart rendered as a Plotly figure embedded in HTML.
//!
//! The figure is assembled as plain JSON so the page only needs the Plotly.js
//! script from its CDN. Visual constants follow a seaborn-like look: grey
//! plot area, white grid lines, muted blue trace.

use crate::interpolate::RollingSeries;
use crate::traits::GraphRenderer;
use booklog_common::{BooklogError, Result};
use booklog_config::{AnnotationConfig, AnnotationPolicy, ChartConfig};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";
const LINE_COLOR: &str = "rgb(76,114,176)";
const PLOT_BACKGROUND: &str = "rgb(234,234,242)";
const FONT_COLOR: &str = "rgb(36,36,36)";
const HOVER_TEMPLATE: &str =
    "<b>%{hovertext}</b><br><br>Date=%{x}<br>Rolling Average=%{y}<extra></extra>";

/// An annotation placed on a concrete point of the series.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnnotation {
    /// Marker text
    pub label: String,
    /// Day the arrow points at
    pub date: NaiveDate,
    /// Rounded rolling average on that day
    pub y: f64,
}

/// Place each configured annotation on the series according to `policy`.
pub fn resolve_annotations(
    series: &RollingSeries,
    annotations: &[AnnotationConfig],
    policy: AnnotationPolicy,
) -> Result<Vec<ResolvedAnnotation>> {
    let mut resolved = Vec::with_capacity(annotations.len());

    for annotation in annotations {
        if let Some(point) = series.get(annotation.date) {
            resolved.push(ResolvedAnnotation {
                label: annotation.label.clone(),
                date: point.date,
                y: point.plotted_value(),
            });
            continue;
        }

        match policy {
            AnnotationPolicy::Error => {
                return Err(BooklogError::AnnotationOutOfRange {
                    label: annotation.label.clone(),
                    date: annotation.date,
                });
            }
            AnnotationPolicy::Skip => {
                warn!(
                    label = %annotation.label,
                    date = %annotation.date,
                    "Skipping annotation outside the reading series"
                );
            }
            AnnotationPolicy::Clamp => {
                let nearest = match (series.first(), series.last()) {
                    (Some(first), _) if annotation.date < first.date => Some(first),
                    (_, last) => last,
                };
                let Some(point) = nearest else {
                    warn!(label = %annotation.label, "No data to pin annotation to");
                    continue;
                };
                debug!(
                    label = %annotation.label,
                    from = %annotation.date,
                    to = %point.date,
                    "Clamped annotation"
                );
                resolved.push(ResolvedAnnotation {
                    label: annotation.label.clone(),
                    date: point.date,
                    y: point.plotted_value(),
                });
            }
        }
    }

    Ok(resolved)
}

/// A complete Plotly figure for the reading series.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingChart {
    data: Value,
    layout: Value,
    annotations: Vec<ResolvedAnnotation>,
}

impl ReadingChart {
    /// Assemble the figure, resolving annotations per the chart policy.
    pub fn build(series: &RollingSeries, config: &ChartConfig) -> Result<Self> {
        let annotations =
            resolve_annotations(series, &config.annotations, config.annotation_policy)?;

        let points = series.points();
        let x: Vec<String> = points
            .iter()
            .map(|point| point.date.format(DATE_FORMAT).to_string())
            .collect();
        let y: Vec<f64> = points.iter().map(|point| point.plotted_value()).collect();
        let hover: Vec<&str> = points.iter().map(|point| point.titles.as_str()).collect();
        let markers: Vec<Value> = annotations.iter().map(annotation_json).collect();

        let data = json!([{
            "type": "scatter",
            "mode": "lines",
            "name": "",
            "x": x,
            "y": y,
            "hovertext": hover,
            "hovertemplate": HOVER_TEMPLATE,
            "line": { "color": LINE_COLOR, "width": 2 },
            "showlegend": false,
        }]);

        let layout = json!({
            "title": { "text": config.title },
            "font": { "color": FONT_COLOR },
            "paper_bgcolor": "white",
            "plot_bgcolor": PLOT_BACKGROUND,
            "hovermode": "closest",
            "xaxis": {
                "title": { "text": "Date" },
                "type": "date",
                "gridcolor": "white",
                "rangeslider": { "visible": true },
                "rangeselector": { "buttons": range_buttons() },
            },
            "yaxis": {
                "title": { "text": config.y_axis_title },
                "gridcolor": "white",
                "rangemode": "tozero",
            },
            "annotations": markers,
        });

        Ok(Self {
            data,
            layout,
            annotations,
        })
    }

    /// Trace array.
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Layout object.
    pub const fn layout(&self) -> &Value {
        &self.layout
    }

    /// Annotations that made it onto the chart.
    pub fn annotations(&self) -> &[ResolvedAnnotation] {
        &self.annotations
    }

    /// The figure as Plotly's `{data, layout}` JSON.
    pub fn figure(&self) -> Value {
        json!({ "data": self.data, "layout": self.layout })
    }

    /// Render the chart as an HTML fragment, or a full document when
    /// `full_html` is set.
    pub fn to_html(&self, config: &ChartConfig) -> String {
        let div_id = escape_html(&config.div_id);
        let fragment = format!(
            concat!(
                "<div id=\"{div_id}\" class=\"plotly-graph-div\" style=\"height:100%; width:100%;\"></div>\n",
                "<script src=\"{cdn}\" charset=\"utf-8\"></script>\n",
                "<script type=\"text/javascript\">\n",
                "  Plotly.newPlot({target}, {data}, {layout}, {{\"responsive\": true}});\n",
                "</script>\n",
            ),
            div_id = div_id,
            cdn = escape_html(&config.plotly_cdn_url),
            target = script_json(&Value::String(config.div_id.clone())),
            data = script_json(&self.data),
            layout = script_json(&self.layout),
        );

        if !config.full_html {
            return fragment;
        }

        format!(
            concat!(
                "<!DOCTYPE html>\n",
                "<html>\n",
                "<head>\n",
                "<meta charset=\"utf-8\" />\n",
                "<title>{title}</title>\n",
                "</head>\n",
                "<body>\n",
                "{fragment}",
                "</body>\n",
                "</html>\n",
            ),
            title = escape_html(&config.title),
            fragment = fragment,
        )
    }
}

/// Renders the interactive Plotly chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlChartRenderer;

impl GraphRenderer for HtmlChartRenderer {
    fn render(&self, series: &RollingSeries, config: &ChartConfig) -> Result<Vec<u8>> {
        let chart = ReadingChart::build(series, config)?;
        debug!(
            points = series.len(),
            annotations = chart.annotations().len(),
            "Rendered reading chart"
        );
        Ok(chart.to_html(config).into_bytes())
    }

    fn name(&self) -> &'static str {
        "reading_chart"
    }

    fn description(&self) -> &'static str {
        "Interactive rolling pages-per-day chart"
    }
}

fn range_buttons() -> Value {
    json!([
        { "count": 1, "label": "1m", "step": "month", "stepmode": "backward" },
        { "count": 6, "label": "6m", "step": "month", "stepmode": "backward" },
        { "count": 1, "label": "YTD", "step": "year", "stepmode": "todate" },
        { "count": 1, "label": "1y", "step": "year", "stepmode": "backward" },
        { "step": "all" },
    ])
}

fn annotation_json(annotation: &ResolvedAnnotation) -> Value {
    json!({
        "x": annotation.date.format(DATE_FORMAT).to_string(),
        "y": annotation.y,
        "xref": "x",
        "yref": "y",
        "text": annotation.label,
        "font": { "size": 15 },
        "borderwidth": 5,
        "showarrow": true,
        "arrowhead": 7,
        "arrowsize": 1,
        "arrowwidth": 2,
        "ax": 0,
        "ay": 30,
    })
}

/// JSON safe to inline inside a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
