//! Rover photo count per year for one fixed month and day.

use crate::traits::ChartRenderer;
use crate::types::{Bar, BarChart, ChartStyle};
use crate::utils::render_bar_chart_file;
use serde::{Deserialize, Serialize};
use spacegraph_common::Result;
use std::path::Path;

/// Photos found for one year; a failed fetch counts as zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPhotoCount {
    pub year: i32,
    pub count: usize,
}

/// Request describing which rover and calendar day the counts belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoverDay<'a> {
    pub rover: &'a str,
    pub month: u32,
    pub day: u32,
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "2015", "2015 and 2023", "2013, 2015 and 2023"
fn join_years(years: &[i32]) -> String {
    match years {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} and {last}", head.join(", "))
        }
    }
}

/// Build one bar per year, in the order the years were configured.
pub fn build_model(request: &RoverDay<'_>, counts: &[YearPhotoCount], style: &ChartStyle) -> BarChart {
    let years: Vec<i32> = counts.iter().map(|c| c.year).collect();
    BarChart {
        title: format!(
            "Photos taken by {} on {:02}/{:02} in {}",
            capitalize(request.rover),
            request.day,
            request.month,
            join_years(&years)
        ),
        x_desc: "Year".to_string(),
        y_desc: "Photos".to_string(),
        bars: counts
            .iter()
            .enumerate()
            .map(|(i, c)| Bar {
                label: c.year.to_string(),
                value: c.count,
                color: style.palette_color(i),
            })
            .collect(),
    }
}

/// Renders the rover photo bar chart.
#[derive(Debug, Default)]
pub struct RoverPhotosChart;

impl ChartRenderer for RoverPhotosChart {
    type Model = BarChart;

    fn name(&self) -> &'static str {
        "rover photos"
    }

    fn file_name(&self) -> &'static str {
        "rover_photos.png"
    }

    fn render_to_file(&self, model: &BarChart, style: &ChartStyle, path: &Path) -> Result<()> {
        render_bar_chart_file(model, style, path)
    }
}
