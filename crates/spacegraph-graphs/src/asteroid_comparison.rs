//! Two-panel asteroid comparison: totals per year and the hazardous split.

use crate::aggregator::{count_hazardous_per_year, count_per_year, YearTaggedAsteroidTable};
use crate::traits::ChartRenderer;
use crate::types::{Bar, BarChart, ChartStyle, Stack, StackedBarChart};
use crate::utils::{draw_bar_chart, draw_stacked_bar_chart, parse_color};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use spacegraph_common::Result;
use std::path::Path;
use tracing::{info, instrument};

/// Both panels of the asteroid comparison chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsteroidComparison {
    pub totals: BarChart,
    pub hazard: StackedBarChart,
}

/// Build the chart model from a year-tagged table.
///
/// Years appear in ascending order. A year without hazardous (or without
/// non-hazardous) asteroids gets an explicit zero layer.
pub fn build_model(table: &YearTaggedAsteroidTable, style: &ChartStyle) -> AsteroidComparison {
    let years = table.years();
    let per_year = count_per_year(table);
    let split = count_hazardous_per_year(table).zero_filled(&years);

    let totals = BarChart {
        title: "Asteroids detected".to_string(),
        x_desc: "Year".to_string(),
        y_desc: "Asteroids".to_string(),
        bars: years
            .iter()
            .enumerate()
            .map(|(i, year)| Bar {
                label: year.to_string(),
                value: per_year.get(year).copied().unwrap_or(0),
                color: style.palette_color(i),
            })
            .collect(),
    };

    let hazard = StackedBarChart {
        title: "Potentially hazardous asteroids".to_string(),
        x_desc: "Year".to_string(),
        y_desc: "Asteroids".to_string(),
        categories: years.iter().map(ToString::to_string).collect(),
        stacks: vec![
            Stack {
                name: "Not hazardous".to_string(),
                color: style.non_hazardous.clone(),
                values: split.iter().map(|s| s.non_hazardous).collect(),
            },
            Stack {
                name: "Hazardous".to_string(),
                color: style.hazardous.clone(),
                values: split.iter().map(|s| s.hazardous).collect(),
            },
        ],
    };

    AsteroidComparison { totals, hazard }
}

/// Renders [`AsteroidComparison`] side by side.
#[derive(Debug, Default)]
pub struct AsteroidComparisonChart;

impl ChartRenderer for AsteroidComparisonChart {
    type Model = AsteroidComparison;

    fn name(&self) -> &'static str {
        "asteroid comparison"
    }

    fn file_name(&self) -> &'static str {
        "asteroid_comparison.png"
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn render_to_file(&self, model: &AsteroidComparison, style: &ChartStyle, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&parse_color(&style.background))?;

        let panels = root.split_evenly((1, 2));
        draw_bar_chart(&panels[0], &model.totals, style)?;
        draw_stacked_bar_chart(&panels[1], &model.hazard, style)?;
        root.present()?;

        info!("Successfully rendered asteroid comparison to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::combine_by_year;
    use spacegraph_common::test_utils::asteroid;

    #[test]
    fn test_model_counts_and_year_order() {
        // The newer table is passed first; the chart still reads left to right by year.
        let table = combine_by_year(
            vec![asteroid("a", true), asteroid("b", false), asteroid("c", false)],
            2024,
            vec![asteroid("d", false)],
            2005,
        );
        let style = ChartStyle::default();
        let model = build_model(&table, &style);

        assert_eq!(model.totals.labels(), vec!["2005", "2024"]);
        assert_eq!(model.totals.values(), vec![1, 3]);
        assert_eq!(model.totals.bars[1].color, style.palette_color(1));

        assert_eq!(model.hazard.categories, vec!["2005", "2024"]);
        assert_eq!(model.hazard.stacks[0].values, vec![1, 2]);
        // 2005 has no hazardous asteroid and still gets a zero layer.
        assert_eq!(model.hazard.stacks[1].values, vec![0, 1]);
        assert_eq!(model.hazard.stacks[1].color, style.hazardous);
        assert_eq!(model.hazard.totals(), model.totals.values());
    }

    #[test]
    fn test_empty_table_gives_empty_panels() {
        let model = build_model(&YearTaggedAsteroidTable::new(), &ChartStyle::default());
        assert!(model.totals.bars.is_empty());
        assert!(model.hazard.categories.is_empty());
        assert!(model.hazard.stacks.iter().all(|s| s.values.is_empty()));
    }

    #[test]
    fn test_renderer_metadata() {
        let chart = AsteroidComparisonChart;
        assert_eq!(chart.file_name(), "asteroid_comparison.png");
        assert_eq!(chart.name(), "asteroid comparison");
    }
}
