//! Bar chart descriptor for per-model latency
//!
//! [`ChartSpec`] is the plain (category, value) data; rendering is left to
//! `plotly`. Models go on the categorical x axis, average milliseconds on the
//! y axis, one bar per aggregate row.

use crate::aggregate::AggregateRow;
use plotly::common::Title;
use plotly::layout::{Axis, Layout};
use plotly::{Bar as BarTrace, Plot};
use serde::Serialize;

/// Default chart title
pub const DEFAULT_TITLE: &str = "Average Time by Model";

/// A single bar, keyed by model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: String,
    /// Average milliseconds; NaN renders as a missing bar
    pub value: f64,
}

/// Abstract chart data handed to the plotting library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    /// One bar per aggregate row, in row order
    pub fn from_aggregates(rows: &[AggregateRow]) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            x_label: "Model".to_string(),
            y_label: "Average Time (ms)".to_string(),
            bars: rows
                .iter()
                .map(|row| Bar {
                    category: row.model.clone(),
                    value: row.average_time_millis,
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn categories(&self) -> Vec<String> {
        self.bars.iter().map(|b| b.category.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.value).collect()
    }

    /// Build the plotly figure for this chart
    pub fn to_plot(&self) -> Plot {
        let trace = BarTrace::new(self.categories(), self.values()).name(&self.y_label);

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(
            Layout::new()
                .title(Title::with_text(&self.title))
                .x_axis(Axis::new().title(Title::with_text(&self.x_label)))
                .y_axis(Axis::new().title(Title::with_text(&self.y_label))),
        );
        plot
    }

    /// Embeddable `<div>` + script for the figure (plotly.js must be loaded by the page)
    pub fn to_inline_html(&self, div_id: &str) -> String {
        self.to_plot().to_inline_html(Some(div_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(model: &str, avg: f64) -> AggregateRow {
        AggregateRow {
            model: model.to_string(),
            average_time_millis: avg,
            samples: if avg.is_nan() { 0 } else { 1 },
            missing: 0,
            min_time_millis: None,
            max_time_millis: None,
            solved_rate: None,
        }
    }

    #[test]
    fn test_one_bar_per_row() {
        let spec = ChartSpec::from_aggregates(&[row("m1", 550.0), row("m2", 50.0)]);
        assert_eq!(spec.categories(), vec!["m1", "m2"]);
        assert_eq!(spec.values(), vec![550.0, 50.0]);
        assert_eq!(spec.x_label, "Model");
    }

    #[test]
    fn test_empty_chart() {
        let spec = ChartSpec::from_aggregates(&[]);
        assert!(spec.bars.is_empty());
        assert!(spec.to_plot().to_json().contains("\"type\":\"bar\""));
    }

    #[test]
    fn test_plot_json_contains_pairs() {
        let spec = ChartSpec::from_aggregates(&[row("CSPSolver", 12.5)]).with_title("Sudoku");
        let json = spec.to_plot().to_json();
        assert!(json.contains("\"type\":\"bar\""));
        assert!(json.contains("CSPSolver"));
        assert!(json.contains("12.5"));
        assert!(json.contains("Sudoku"));
    }

    #[test]
    fn test_layout_carries_axis_titles() {
        let json = ChartSpec::from_aggregates(&[row("m1", 1.0)]).to_plot().to_json();
        assert!(json.contains("\"text\":\"Average Time by Model\""));
        assert!(json.contains("\"text\":\"Model\""));
        assert!(json.contains("\"text\":\"Average Time (ms)\""));
    }

    #[test]
    fn test_nan_bar_serializes_as_null() {
        let spec = ChartSpec::from_aggregates(&[row("m3", f64::NAN)]);
        let json = spec.to_plot().to_json();
        assert!(json.contains("null"));
        assert!(!json.contains("NaN"));
    }

    #[test]
    fn test_inline_html_uses_div_id() {
        let spec = ChartSpec::from_aggregates(&[row("m1", 1.0)]);
        let html = spec.to_inline_html("latency-chart");
        assert!(html.contains("latency-chart"));
        assert!(html.contains("Plotly.newPlot"));
    }
}
