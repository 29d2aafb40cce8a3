//! Default values: the original two-interval, two-year comparison.

use crate::schema::*;
use chrono::NaiveDate;
use spacegraph_common::{DateInterval, DEFAULT_BASE_URL, DEFAULT_ROVER};
use std::path::PathBuf;

/// Key accepted by the public API with a low rate limit.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

impl Default for NasaApiConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            rover: DEFAULT_ROVER.to_string(),
        }
    }
}

fn first_week_of_september(year: i32) -> Option<DateInterval> {
    let start = NaiveDate::from_ymd_opt(year, 9, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 9, 7)?;
    DateInterval::new(start, end).ok()
}

impl Default for QueriesConfig {
    fn default() -> Self {
        Self {
            intervals: [2024, 2005]
                .into_iter()
                .filter_map(first_week_of_september)
                .collect(),
        }
    }
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            month: 6,
            day: 3,
            years: vec![2015, 2023],
            print_photo_urls: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("graphs"),
            width: 1200,
            height: 500,
            print_apod_details: true,
        }
    }
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            palette: vec!["#1f77b4".to_string(), "#ff7f0e".to_string()],
            hazardous: "#d62728".to_string(),
            non_hazardous: "#1f77b4".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            enable_grid: true,
            annotate_bars: true,
        }
    }
}
