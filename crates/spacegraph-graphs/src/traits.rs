//! Chart renderer trait shared by every chart type.

use crate::types::ChartStyle;
use spacegraph_common::Result;
use std::path::Path;

/// A chart that can be drawn from its model into a PNG file.
pub trait ChartRenderer {
    /// The chart model this renderer draws.
    type Model;

    /// Gets the name of this chart type.
    fn name(&self) -> &'static str;

    /// File name the chart is written to inside the output directory.
    fn file_name(&self) -> &'static str;

    /// Draws `model` to `path` using `style`.
    fn render_to_file(&self, model: &Self::Model, style: &ChartStyle, path: &Path) -> Result<()>;
}
