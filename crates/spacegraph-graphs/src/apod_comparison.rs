//! APOD entry count per date interval.

use crate::report::interval_label;
use crate::traits::ChartRenderer;
use crate::types::{Bar, BarChart, ChartStyle};
use crate::utils::render_bar_chart_file;
use spacegraph_common::Result;
use std::path::Path;

/// Build one bar per interval, labelled like the detail report headings.
pub fn build_model(counts: &[usize], labels: &[String], style: &ChartStyle) -> BarChart {
    BarChart {
        title: "APOD entry comparison".to_string(),
        x_desc: "Date interval".to_string(),
        y_desc: "APOD entries".to_string(),
        bars: counts
            .iter()
            .enumerate()
            .map(|(i, &value)| Bar {
                label: interval_label(labels, i),
                value,
                color: style.palette_color(i),
            })
            .collect(),
    }
}

/// Renders the APOD comparison bar chart.
#[derive(Debug, Default)]
pub struct ApodComparisonChart;

impl ChartRenderer for ApodComparisonChart {
    type Model = BarChart;

    fn name(&self) -> &'static str {
        "APOD comparison"
    }

    fn file_name(&self) -> &'static str {
        "apod_comparison.png"
    }

    fn render_to_file(&self, model: &BarChart, style: &ChartStyle, path: &Path) -> Result<()> {
        render_bar_chart_file(model, style, path)
    }
}
