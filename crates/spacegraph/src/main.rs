//! Main entry point for SpaceGraph.

use anyhow::Context;
use spacegraph::{AppError, Pipeline};
use spacegraph_common::{init_logging, NasaClient, NasaConfig};
use spacegraph_config::ConfigLoader;
use spacegraph_graphs::GraphManager;
use std::io;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()
        .map_err(AppError::Config)
        .context("failed to load configuration")?;

    init_logging(&config.logging).context("failed to initialize logging")?;
    info!("Starting SpaceGraph");

    let client = NasaClient::new(NasaConfig::from(&config.nasa))
        .map_err(AppError::Client)
        .context("failed to build the NASA API client")?;
    let graphs = GraphManager::from_config(&config);
    let pipeline = Pipeline::new(&config, client);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match pipeline.run(&graphs, &mut out).await {
        Ok(summary) => {
            info!(
                charts = summary.charts.len(),
                failures = summary.failures,
                "Finished; charts written to {}",
                graphs.output_dir().display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
