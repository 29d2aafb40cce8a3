//! Domain records shared across the workspace.

use crate::error::{Result, SpaceGraphError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One near-Earth asteroid occurrence in the feed, flattened.
///
/// Velocity and miss distance come from the asteroid's first close-approach
/// entry only. See [`crate::models::NeoFeedResponse::into_records`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidRecord {
    pub name: String,
    pub id: String,
    /// Feed date under which the asteroid was listed
    pub approach_date: NaiveDate,
    pub diameter_min_km: f64,
    pub diameter_max_km: f64,
    pub relative_velocity_km_s: f64,
    pub miss_distance_km: f64,
    /// Official "potentially hazardous" designation
    pub hazardous: bool,
    pub first_observed: Option<NaiveDate>,
}

/// One Astronomy Picture of the Day entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodEntry {
    pub title: String,
    pub date: NaiveDate,
    /// Empty when the API omits it (some video days)
    #[serde(default)]
    pub url: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Inclusive calendar date range used to query the feed and APOD endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
    label: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct RawInterval {
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl TryFrom<RawInterval> for DateInterval {
    type Error = SpaceGraphError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        let interval = Self::new(raw.start, raw.end)?;
        Ok(match raw.label {
            Some(label) => interval.with_label(label),
            None => interval,
        })
    }
}

impl From<DateInterval> for RawInterval {
    fn from(interval: DateInterval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            label: interval.label,
        }
    }
}

impl DateInterval {
    /// Create an interval, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SpaceGraphError::validation(format!(
                "interval start {start} is after end {end}"
            )));
        }
        Ok(Self {
            start,
            end,
            label: None,
        })
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Year the interval is tagged with when its asteroids are combined.
    pub fn query_year(&self) -> i32 {
        self.start.year()
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Explicit label, or `"<start> to <end>"`.
    pub fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
