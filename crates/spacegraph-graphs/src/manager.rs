//! Graph manager writing every chart into the output directory.

use crate::traits::ChartRenderer;
use crate::types::ChartStyle;
use spacegraph_common::Result;
use spacegraph_config::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Renders chart models into files under one output directory.
#[derive(Debug, Clone)]
pub struct GraphManager {
    output_dir: PathBuf,
    style: ChartStyle,
}

impl GraphManager {
    /// Creates a new graph manager.
    pub fn new(output_dir: impl Into<PathBuf>, style: ChartStyle) -> Self {
        Self {
            output_dir: output_dir.into(),
            style,
        }
    }

    /// Creates a graph manager from the output and styling sections.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.output.directory.clone(),
            ChartStyle::from_config(&config.styling, &config.output),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Where `renderer` writes its chart.
    pub fn path_for<R: ChartRenderer>(&self, renderer: &R) -> PathBuf {
        self.output_dir.join(renderer.file_name())
    }

    /// Renders one chart, creating the output directory if needed.
    pub fn render<R: ChartRenderer>(&self, renderer: &R, model: &R::Model) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(renderer);
        debug!("Rendering {} chart", renderer.name());
        renderer.render_to_file(model, &self.style, &path)?;
        info!("Wrote {}", path.display());
        Ok(path)
    }
}
