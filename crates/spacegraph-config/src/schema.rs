//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use spacegraph_common::{DateInterval, LoggingConfig, NasaConfig};
use std::path::PathBuf;

/// Main configuration structure for SpaceGraph.
///
/// Every section falls back to its defaults, so a file only needs the values
/// it changes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// NASA API configuration.
    pub nasa: NasaApiConfig,
    /// Date intervals to compare.
    pub queries: QueriesConfig,
    /// Rover photo comparison.
    pub rover: RoverConfig,
    /// Output locations and chart size.
    pub output: OutputConfig,
    /// Chart styling.
    pub styling: StylingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// NASA API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NasaApiConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Rover whose photos are counted.
    pub rover: String,
}

impl std::fmt::Debug for NasaApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NasaApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("rover", &self.rover)
            .finish()
    }
}

impl From<&NasaApiConfig> for NasaConfig {
    fn from(config: &NasaApiConfig) -> Self {
        NasaConfig::new(config.base_url.clone(), config.api_key.clone())
            .with_timeout(config.timeout_secs)
            .with_rover(config.rover.clone())
    }
}

/// Date intervals whose asteroid feeds and APOD entries are compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueriesConfig {
    /// Intervals in display order. Each is tagged with the year of its start date.
    pub intervals: Vec<DateInterval>,
}

/// Rover photo comparison: one fixed month/day across several years.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub month: u32,
    pub day: u32,
    pub years: Vec<i32>,
    /// Print every fetched image URL.
    pub print_photo_urls: bool,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the PNG charts are written to.
    pub directory: PathBuf,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Print APOD titles, dates, URLs and explanations.
    pub print_apod_details: bool,
}

/// Chart styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    /// Background color.
    pub background: String,
    /// Bar colors, cycled per bar.
    pub palette: Vec<String>,
    /// Stack color for hazardous asteroids.
    pub hazardous: String,
    /// Stack color for non-hazardous asteroids.
    pub non_hazardous: String,
    /// Font family for titles and labels.
    pub font_family: String,
    /// Title font size.
    pub title_font_size: u32,
    /// Draw horizontal grid lines.
    pub enable_grid: bool,
    /// Print the value above each bar.
    pub annotate_bars: bool,
}
