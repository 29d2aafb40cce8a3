//! NASA API response models and their normalization into flat records.

use crate::error::{Result, SpaceGraphError};
use crate::types::AsteroidRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Asteroid Feed (NeoWs) Models
// ============================================================================

/// Response model for the `neo/rest/v1/feed` endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NeoFeedResponse {
    /// Total asteroid occurrences in the response
    #[serde(default)]
    pub element_count: Option<u64>,
    /// Asteroids keyed by feed date (`YYYY-MM-DD`)
    pub near_earth_objects: BTreeMap<String, Vec<NeoObject>>,
}

/// A single asteroid as listed under one feed date
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NeoObject {
    pub id: String,
    pub name: String,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
    #[serde(default)]
    pub orbital_data: Option<OrbitalData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// One flyby event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: Option<String>,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: Measurement,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MissDistance {
    pub kilometers: Measurement,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrbitalData {
    #[serde(default)]
    pub first_observation_date: Option<String>,
}

/// A measurement as sent by the feed, usually a decimal string.
///
/// The raw value is kept so one unreadable number only costs its asteroid.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    /// Finite numeric value, `None` when the text is not a number
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl NeoObject {
    /// Flatten this asteroid into a record for the given feed date.
    ///
    /// Only the first close-approach entry is used, even when the feed lists
    /// several. Returns `None`, with a warning, when the list is empty or its
    /// velocity or miss distance is not a number.
    pub fn to_record(&self, approach_date: NaiveDate) -> Option<AsteroidRecord> {
        let Some(first) = self.close_approach_data.first() else {
            warn!(
                asteroid_id = %self.id,
                date = %approach_date,
                "Asteroid has no close-approach data, skipping"
            );
            return None;
        };

        let velocity = &first.relative_velocity.kilometers_per_second;
        let miss = &first.miss_distance.kilometers;
        let (Some(relative_velocity_km_s), Some(miss_distance_km)) = (velocity.value(), miss.value())
        else {
            warn!(
                asteroid_id = %self.id,
                date = %approach_date,
                ?velocity,
                ?miss,
                "Asteroid has an unreadable measurement, skipping"
            );
            return None;
        };

        let first_observed = self
            .orbital_data
            .as_ref()
            .and_then(|orbit| orbit.first_observation_date.as_deref())
            .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok());

        Some(AsteroidRecord {
            name: self.name.clone(),
            id: self.id.clone(),
            approach_date,
            diameter_min_km: self.estimated_diameter.kilometers.estimated_diameter_min,
            diameter_max_km: self.estimated_diameter.kilometers.estimated_diameter_max,
            relative_velocity_km_s,
            miss_distance_km,
            hazardous: self.is_potentially_hazardous_asteroid,
            first_observed,
        })
    }
}

impl NeoFeedResponse {
    /// Flatten the date → asteroids mapping into one record per occurrence.
    ///
    /// Dates are visited in ascending order and asteroids in response order,
    /// so the output depends only on the body. Asteroids that cannot be
    /// flattened are skipped; the rest of the date is kept.
    pub fn into_records(self) -> Result<Vec<AsteroidRecord>> {
        let mut records = Vec::new();

        for (raw_date, objects) in self.near_earth_objects {
            let approach_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|e| {
                SpaceGraphError::validation_field(
                    format!("feed date {raw_date:?} is not YYYY-MM-DD: {e}"),
                    "near_earth_objects",
                )
            })?;

            records.extend(objects.iter().filter_map(|object| object.to_record(approach_date)));
        }

        Ok(records)
    }
}

// ============================================================================
// Mars Rover Photo Models
// ============================================================================

/// Response model for the rover `photos` endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoverPhotosResponse {
    #[serde(default)]
    pub photos: Vec<RoverPhoto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoverPhoto {
    #[serde(default)]
    pub id: Option<u64>,
    pub img_src: String,
}

impl RoverPhotosResponse {
    /// Image URLs in response order.
    pub fn image_urls(self) -> Vec<String> {
        self.photos.into_iter().map(|photo| photo.img_src).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_json(objects_by_date: &str) -> String {
        format!(r#"{{"element_count": 0, "near_earth_objects": {{{objects_by_date}}}}}"#)
    }

    fn neo(id: &str, hazardous: bool, approaches: &str) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "name": "({id})",
                "estimated_diameter": {{"kilometers": {{"estimated_diameter_min": 0.1, "estimated_diameter_max": 0.3}}}},
                "is_potentially_hazardous_asteroid": {hazardous},
                "close_approach_data": [{approaches}]
            }}"#
        )
    }

    fn approach(velocity: &str, miss: &str) -> String {
        format!(
            r#"{{"relative_velocity": {{"kilometers_per_second": {velocity}}}, "miss_distance": {{"kilometers": {miss}}}}}"#
        )
    }

    #[test]
    fn test_measurement_accepts_numbers_and_strings() {
        let a = approach(r#""12.5""#, "40000.25");
        let parsed: CloseApproach = serde_json::from_str(&a).unwrap();
        assert_eq!(parsed.relative_velocity.kilometers_per_second.value(), Some(12.5));
        assert_eq!(parsed.miss_distance.kilometers.value(), Some(40000.25));

        let bad = approach(r#""fast""#, r#""NaN""#);
        let parsed: CloseApproach = serde_json::from_str(&bad).unwrap();
        assert_eq!(
            parsed.relative_velocity.kilometers_per_second,
            Measurement::Text("fast".to_string())
        );
        assert_eq!(parsed.relative_velocity.kilometers_per_second.value(), None);
        assert_eq!(parsed.miss_distance.kilometers.value(), None);
    }

    #[test]
    fn test_unreadable_measurement_skips_only_that_asteroid() {
        let body = feed_json(&format!(
            r#""2024-09-01": [{}, {}, {}], "2024-09-02": [{}]"#,
            neo("fast", false, &approach(r#""fast""#, r#""100""#)),
            neo("kept", true, &approach(r#""4.5""#, r#""200""#)),
            neo("far", false, &approach(r#""1.0""#, r#""a long way""#)),
            neo("next", false, &approach("2.0", "300"))
        ));
        let feed: NeoFeedResponse = serde_json::from_str(&body).unwrap();
        let records = feed.into_records().unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["kept", "next"]);
        assert_eq!(records[0].relative_velocity_km_s, 4.5);
        assert_eq!(records[0].miss_distance_km, 200.0);
    }

    #[test]
    fn test_first_close_approach_is_used() {
        let body = feed_json(&format!(
            r#""2024-09-01": [{}]"#,
            neo("1", false, &format!("{},{}", approach(r#""7.0""#, r#""100""#), approach(r#""99.0""#, r#""5""#)))
        ));
        let feed: NeoFeedResponse = serde_json::from_str(&body).unwrap();
        let records = feed.into_records().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relative_velocity_km_s, 7.0);
        assert_eq!(records[0].miss_distance_km, 100.0);
    }

    #[test]
    fn test_asteroid_without_approaches_is_skipped() {
        let body = feed_json(&format!(
            r#""2024-09-01": [{}, {}]"#,
            neo("1", true, ""),
            neo("2", true, &approach("1.0", "2.0"))
        ));
        let feed: NeoFeedResponse = serde_json::from_str(&body).unwrap();
        let records = feed.into_records().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "2");
    }

    #[test]
    fn test_dates_visited_in_ascending_order() {
        let body = feed_json(&format!(
            r#""2024-09-03": [{}], "2024-09-01": [{}]"#,
            neo("late", false, &approach("1", "1")),
            neo("early", false, &approach("1", "1"))
        ));
        let feed: NeoFeedResponse = serde_json::from_str(&body).unwrap();
        let ids: Vec<String> = feed.into_records().unwrap().into_iter().map(|r| r.id).collect();

        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_invalid_feed_date_is_rejected() {
        let body = feed_json(&format!(r#""Sept 1": [{}]"#, neo("1", false, &approach("1", "1"))));
        let feed: NeoFeedResponse = serde_json::from_str(&body).unwrap();
        assert!(feed.into_records().is_err());
    }

    #[test]
    fn test_first_observation_date() {
        let mut object: NeoObject = serde_json::from_str(&neo("1", false, &approach("1", "1"))).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(object.to_record(day).unwrap().first_observed, None);

        object.orbital_data = Some(OrbitalData {
            first_observation_date: Some("1998-03-20".to_string()),
        });
        assert_eq!(
            object.to_record(day).unwrap().first_observed,
            NaiveDate::from_ymd_opt(1998, 3, 20)
        );

        object.orbital_data = Some(OrbitalData {
            first_observation_date: Some("N/A".to_string()),
        });
        assert_eq!(object.to_record(day).unwrap().first_observed, None);
    }

    #[test]
    fn test_rover_photos_missing_list() {
        let response: RoverPhotosResponse = serde_json::from_str("{}").unwrap();
        assert!(response.image_urls().is_empty());

        let response: RoverPhotosResponse = serde_json::from_str(
            r#"{"photos": [{"id": 1, "img_src": "http://a/1.jpg"}, {"img_src": "http://a/2.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(response.image_urls(), vec!["http://a/1.jpg", "http://a/2.jpg"]);
    }
}
