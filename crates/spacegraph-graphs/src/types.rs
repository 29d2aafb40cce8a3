//! Chart models and styling

use serde::{Deserialize, Serialize};
use spacegraph_config::{Config, OutputConfig, StylingConfig};

/// One bar of a simple bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    /// Hex color, `#rrggbb`
    pub color: String,
}

/// A bar chart with one bar per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn labels(&self) -> Vec<String> {
        self.bars.iter().map(|bar| bar.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<usize> {
        self.bars.iter().map(|bar| bar.value).collect()
    }

    pub fn max_value(&self) -> usize {
        self.bars.iter().map(|bar| bar.value).max().unwrap_or(0)
    }
}

/// One layer of a stacked bar chart; `values[i]` belongs to category `i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub name: String,
    pub color: String,
    pub values: Vec<usize>,
}

/// Bars built from layers drawn bottom-up in `stacks` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedBarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    pub stacks: Vec<Stack>,
}

impl StackedBarChart {
    /// Height of each category's full bar
    pub fn totals(&self) -> Vec<usize> {
        (0..self.categories.len())
            .map(|i| {
                self.stacks
                    .iter()
                    .map(|stack| stack.values.get(i).copied().unwrap_or(0))
                    .sum()
            })
            .collect()
    }

    /// `(bottom, top)` of every layer segment for category `index`
    pub fn segments(&self, index: usize) -> Vec<(usize, usize)> {
        let mut base = 0;
        self.stacks
            .iter()
            .map(|stack| {
                let top = base + stack.values.get(index).copied().unwrap_or(0);
                let segment = (base, top);
                base = top;
                segment
            })
            .collect()
    }
}

/// Resolved drawing style shared by every chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub palette: Vec<String>,
    pub hazardous: String,
    pub non_hazardous: String,
    pub font_family: String,
    pub title_font_size: u32,
    pub enable_grid: bool,
    pub annotate_bars: bool,
}

impl ChartStyle {
    pub fn from_config(styling: &StylingConfig, output: &OutputConfig) -> Self {
        Self {
            width: output.width,
            height: output.height,
            background: styling.background.clone(),
            palette: styling.palette.clone(),
            hazardous: styling.hazardous.clone(),
            non_hazardous: styling.non_hazardous.clone(),
            font_family: styling.font_family.clone(),
            title_font_size: styling.title_font_size,
            enable_grid: styling.enable_grid,
            annotate_bars: styling.annotate_bars,
        }
    }

    /// Palette color for bar `index`, cycling; black when the palette is empty
    pub fn palette_color(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return "#000000".to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        let config = Config::default();
        Self::from_config(&config.styling, &config.output)
    }
}
