//! One collection and rendering pass over the configured queries.

use crate::error::{AppError, AppResult};
use spacegraph_common::{ApodEntry, FetchOutcome, NasaClient, Transport};
use spacegraph_config::Config;
use spacegraph_graphs::{
    apod_comparison, asteroid_comparison, count_apod_per_interval, render_detail, rover_photos,
    ApodComparisonChart, AsteroidComparisonChart, GraphManager, RoverDay, RoverPhotosChart,
    YearPhotoCount, YearTaggedAsteroidTable,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Everything fetched during a run, failures already collapsed to empty data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected {
    pub asteroids: YearTaggedAsteroidTable,
    /// APOD entries per interval, in configured order
    pub apod: Vec<Vec<ApodEntry>>,
    pub apod_labels: Vec<String>,
    pub rover_counts: Vec<YearPhotoCount>,
    /// Number of fetches that failed
    pub failures: usize,
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub charts: Vec<PathBuf>,
    pub failures: usize,
}

/// Sequential fetch, report and render pass
pub struct Pipeline<'a, T: Transport> {
    config: &'a Config,
    client: NasaClient<T>,
}

impl<'a, T: Transport> Pipeline<'a, T> {
    pub fn new(config: &'a Config, client: NasaClient<T>) -> Self {
        Self { config, client }
    }

    /// Keep fetched data, or print the failure and fall back to the empty value
    fn settle<D: Default, W: Write>(
        outcome: FetchOutcome<D>,
        out: &mut W,
        failures: &mut usize,
    ) -> AppResult<D> {
        if let Some(failure) = outcome.failure() {
            writeln!(out, "Error: {failure}")?;
            *failures += 1;
        }
        Ok(outcome.data_or_default())
    }

    /// Fetch asteroid feeds and APOD entries for every interval, then rover
    /// photos for every configured year. Upstream failures are printed to
    /// `out` and never stop the run.
    #[instrument(skip_all)]
    pub async fn collect<W: Write>(&self, out: &mut W) -> AppResult<Collected> {
        let mut collected = Collected::default();
        let intervals = &self.config.queries.intervals;

        let mut feeds = Vec::with_capacity(intervals.len());
        for interval in intervals {
            let outcome = self.client.fetch_asteroids_in(interval).await;
            let records = Self::settle(outcome, out, &mut collected.failures)?;
            feeds.push((interval.query_year(), records));
        }
        // Stable sort: tables enter the combined table oldest year first.
        feeds.sort_by_key(|(year, _)| *year);
        for (year, records) in feeds {
            collected.asteroids.append(records, year);
        }

        for interval in intervals {
            let outcome = self.client.fetch_apod_in(interval).await;
            let entries = Self::settle(outcome, out, &mut collected.failures)?;
            collected.apod.push(entries);
            collected.apod_labels.push(interval.label());
        }

        let rover = &self.config.rover;
        for &year in &rover.years {
            let count = if rover.print_photo_urls {
                let outcome = self.client.rover_photo_urls(year, rover.month, rover.day).await;
                let urls = Self::settle(outcome, out, &mut collected.failures)?;
                for url in &urls {
                    writeln!(out, "{url}")?;
                }
                urls.len()
            } else {
                let outcome = self.client.count_rover_photos(year, rover.month, rover.day).await;
                Self::settle(outcome, out, &mut collected.failures)?
            };
            collected.rover_counts.push(YearPhotoCount { year, count });
        }

        if collected.failures > 0 {
            warn!(failures = collected.failures, "Some fetches failed; their data is empty");
        }
        info!(
            asteroids = collected.asteroids.len(),
            apod = collected.apod.iter().map(Vec::len).sum::<usize>(),
            "Collection finished"
        );
        Ok(collected)
    }

    /// Print the APOD detail report when enabled
    pub fn report<W: Write>(&self, collected: &Collected, out: &mut W) -> AppResult<()> {
        if !self.config.output.print_apod_details {
            return Ok(());
        }
        render_detail(out, &collected.apod, &collected.apod_labels).map_err(AppError::Render)
    }

    /// Render the three charts into the manager's output directory
    #[instrument(skip_all)]
    pub fn render(&self, collected: &Collected, graphs: &GraphManager) -> AppResult<Vec<PathBuf>> {
        let style = graphs.style();
        let rover = &self.config.rover;

        let asteroid_model = asteroid_comparison::build_model(&collected.asteroids, style);
        let apod_model = apod_comparison::build_model(
            &count_apod_per_interval(&collected.apod),
            &collected.apod_labels,
            style,
        );
        let rover_model = rover_photos::build_model(
            &RoverDay {
                rover: &self.client.config().rover,
                month: rover.month,
                day: rover.day,
            },
            &collected.rover_counts,
            style,
        );

        Ok(vec![
            graphs
                .render(&AsteroidComparisonChart, &asteroid_model)
                .map_err(AppError::Render)?,
            graphs
                .render(&ApodComparisonChart, &apod_model)
                .map_err(AppError::Render)?,
            graphs
                .render(&RoverPhotosChart, &rover_model)
                .map_err(AppError::Render)?,
        ])
    }

    /// Collect, report and render
    pub async fn run<W: Write>(&self, graphs: &GraphManager, out: &mut W) -> AppResult<RunSummary> {
        let collected = self.collect(out).await?;
        self.report(&collected, out)?;
        let charts = self.render(&collected, graphs)?;
        out.flush()?;

        Ok(RunSummary {
            charts,
            failures: collected.failures,
        })
    }
}
