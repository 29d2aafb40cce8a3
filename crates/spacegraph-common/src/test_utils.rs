//! Test utilities and shared test helpers for SpaceGraph.
//!
//! This module provides canned API responses, record builders and logging
//! setup that can be used across all crates in the workspace for unit and
//! integration testing.

use crate::types::{ApodEntry, AsteroidRecord};
use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Calendar date shorthand for tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Build an asteroid record with the given id and hazard flag.
pub fn asteroid(id: &str, hazardous: bool) -> AsteroidRecord {
    AsteroidRecord {
        name: format!("({id})"),
        id: id.to_string(),
        approach_date: date(2024, 9, 1),
        diameter_min_km: 0.1,
        diameter_max_km: 0.25,
        relative_velocity_km_s: 12.0,
        miss_distance_km: 4_500_000.0,
        hazardous,
        first_observed: None,
    }
}

/// Build an APOD entry for the given day.
pub fn apod_entry(title: &str, day: NaiveDate) -> ApodEntry {
    ApodEntry {
        title: title.to_string(),
        date: day,
        url: format!("https://apod.nasa.gov/apod/image/{}.jpg", day.format("%y%m%d")),
        explanation: format!("Explanation of {title}."),
        media_type: Some("image".to_string()),
        hdurl: None,
        copyright: None,
    }
}

/// Canned API response bodies.
pub mod fixtures {
    /// Feed for 2024-09-01..2024-09-02: three asteroids, one hazardous, the
    /// first with two close-approach entries.
    pub const NEO_FEED: &str = r#"{
        "links": {"self": "https://api.nasa.gov/neo/rest/v1/feed?start_date=2024-09-01&end_date=2024-09-02"},
        "element_count": 3,
        "near_earth_objects": {
            "2024-09-02": [
                {
                    "id": "54481273",
                    "name": "(2024 QS1)",
                    "estimated_diameter": {
                        "kilometers": {"estimated_diameter_min": 0.0111, "estimated_diameter_max": 0.0248}
                    },
                    "is_potentially_hazardous_asteroid": false,
                    "close_approach_data": [
                        {
                            "close_approach_date": "2024-09-02",
                            "relative_velocity": {"kilometers_per_second": "6.5102", "kilometers_per_hour": "23436.7"},
                            "miss_distance": {"astronomical": "0.0123", "kilometers": "1840121.5"}
                        }
                    ]
                }
            ],
            "2024-09-01": [
                {
                    "id": "2465633",
                    "name": "465633 (2009 JR5)",
                    "estimated_diameter": {
                        "kilometers": {"estimated_diameter_min": 0.2170475943, "estimated_diameter_max": 0.4853331752}
                    },
                    "is_potentially_hazardous_asteroid": true,
                    "close_approach_data": [
                        {
                            "close_approach_date": "2024-09-01",
                            "relative_velocity": {"kilometers_per_second": "18.1273774"},
                            "miss_distance": {"kilometers": "45290298.2"}
                        },
                        {
                            "close_approach_date": "2031-08-28",
                            "relative_velocity": {"kilometers_per_second": "21.0000000"},
                            "miss_distance": {"kilometers": "9000000.0"}
                        }
                    ],
                    "orbital_data": {"first_observation_date": "2009-05-04"}
                },
                {
                    "id": "3426410",
                    "name": "(2008 QV11)",
                    "estimated_diameter": {
                        "kilometers": {"estimated_diameter_min": 0.2111, "estimated_diameter_max": 0.4721}
                    },
                    "is_potentially_hazardous_asteroid": false,
                    "close_approach_data": [
                        {
                            "close_approach_date": "2024-09-01",
                            "relative_velocity": {"kilometers_per_second": "6.5734"},
                            "miss_distance": {"kilometers": "46467064.0"}
                        }
                    ]
                }
            ]
        }
    }"#;

    /// APOD for 2024-09-01..2024-09-02, the second day a video.
    pub const APOD_RANGE: &str = r#"[
        {
            "date": "2024-09-01",
            "explanation": "The most distant object easily visible to the unaided eye.",
            "hdurl": "https://apod.nasa.gov/apod/image/2409/m31_big.jpg",
            "media_type": "image",
            "service_version": "v1",
            "title": "The Andromeda Galaxy",
            "url": "https://apod.nasa.gov/apod/image/2409/m31.jpg"
        },
        {
            "date": "2024-09-02",
            "explanation": "A total solar eclipse in motion.",
            "media_type": "video",
            "service_version": "v1",
            "title": "Eclipse Timelapse",
            "url": "https://www.youtube.com/embed/xyz"
        }
    ]"#;

    /// Three photos from one sol.
    pub const ROVER_PHOTOS: &str = r#"{
        "photos": [
            {"id": 102693, "sol": 1000, "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/1.JPG", "earth_date": "2015-06-03"},
            {"id": 102694, "sol": 1000, "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/2.JPG", "earth_date": "2015-06-03"},
            {"id": 102850, "sol": 1000, "img_src": "http://mars.jpl.nasa.gov/msl-raw-images/3.JPG", "earth_date": "2015-06-03"}
        ]
    }"#;
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use super::asteroid;
    use crate::types::AsteroidRecord;
    use proptest::prelude::*;

    /// Strategy for asteroid lists with arbitrary ids and hazard flags.
    pub fn asteroids_strategy(max_len: usize) -> impl Strategy<Value = Vec<AsteroidRecord>> {
        prop::collection::vec((r"[0-9]{5,8}", any::<bool>()), 0..=max_len).prop_map(|items| {
            items
                .into_iter()
                .map(|(id, hazardous)| asteroid(&id, hazardous))
                .collect()
        })
    }
}
