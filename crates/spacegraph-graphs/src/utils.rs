//! Drawing helpers shared by the chart renderers.

use crate::types::{BarChart, ChartStyle, StackedBarChart};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use spacegraph_common::Result;
use std::ops::Range;
use std::path::Path;
use tracing::info;

const MARGIN: i32 = 20;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 60;
const LABEL_FONT_SIZE: u32 = 14;
const BAR_HALF_WIDTH: f64 = 0.35;

/// Parse a `#rrggbb` color, defaulting to black
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// X range placing category `i` at `i` with half a slot of padding either side
pub fn category_range(count: usize) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5)
}

/// Y range leaving headroom above the tallest bar for its annotation
pub fn value_range(max: usize) -> Range<f64> {
    0.0..(max as f64 * 1.15).max(1.0)
}

/// Axis label at `x`: the category name at integer positions, blank elsewhere
pub fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn value_label_style(style: &ChartStyle) -> TextStyle<'_> {
    (style.font_family.as_str(), LABEL_FONT_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom))
}

fn bar(x: f64, bottom: usize, top: usize, color: RGBColor) -> Rectangle<(f64, f64)> {
    Rectangle::new(
        [(x - BAR_HALF_WIDTH, bottom as f64), (x + BAR_HALF_WIDTH, top as f64)],
        color.filled(),
    )
}

/// Draw one bar per category
pub fn draw_bar_chart<DB>(area: &DrawingArea<DB, Shift>, chart: &BarChart, style: &ChartStyle) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels = chart.labels();
    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.title, (style.font_family.as_str(), style.title_font_size))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(category_range(labels.len()), value_range(chart.max_value()))?;

    let formatter = |x: &f64| category_label(&labels, *x);
    {
        let mut mesh = ctx.configure_mesh();
        mesh.x_labels(labels.len() * 2 + 1)
            .x_label_formatter(&formatter)
            .x_desc(chart.x_desc.as_str())
            .y_desc(chart.y_desc.as_str())
            .label_style((style.font_family.as_str(), LABEL_FONT_SIZE))
            .disable_x_mesh();
        if !style.enable_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;
    }

    ctx.draw_series(
        chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| bar(i as f64, 0, b.value, parse_color(&b.color))),
    )?;

    if style.annotate_bars {
        let text_style = value_label_style(style);
        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, b)| {
            Text::new(b.value.to_string(), (i as f64, b.value as f64), text_style.clone())
        }))?;
    }

    Ok(())
}

/// Render a single-panel bar chart to a PNG file
pub fn render_bar_chart_file(chart: &BarChart, style: &ChartStyle, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&parse_color(&style.background))?;
    draw_bar_chart(&root, chart, style)?;
    root.present()?;

    info!("Successfully rendered {} to {}", chart.title, path.display());
    Ok(())
}

/// Draw stacked bars with a legend naming each layer
pub fn draw_stacked_bar_chart<DB>(
    area: &DrawingArea<DB, Shift>,
    chart: &StackedBarChart,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let totals = chart.totals();
    let max = totals.iter().copied().max().unwrap_or(0);
    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.title, (style.font_family.as_str(), style.title_font_size))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(category_range(chart.categories.len()), value_range(max))?;

    let formatter = |x: &f64| category_label(&chart.categories, *x);
    {
        let mut mesh = ctx.configure_mesh();
        mesh.x_labels(chart.categories.len() * 2 + 1)
            .x_label_formatter(&formatter)
            .x_desc(chart.x_desc.as_str())
            .y_desc(chart.y_desc.as_str())
            .label_style((style.font_family.as_str(), LABEL_FONT_SIZE))
            .disable_x_mesh();
        if !style.enable_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;
    }

    for (layer, stack) in chart.stacks.iter().enumerate() {
        let color = parse_color(&stack.color);
        let rects: Vec<_> = (0..chart.categories.len())
            .map(|i| {
                let (bottom, top) = chart.segments(i)[layer];
                bar(i as f64, bottom, top, color)
            })
            .collect();
        ctx.draw_series(rects)?
            .label(stack.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if style.annotate_bars {
        let text_style = value_label_style(style);
        ctx.draw_series(totals.iter().enumerate().map(|(i, total)| {
            Text::new(total.to_string(), (i as f64, *total as f64), text_style.clone())
        }))?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
