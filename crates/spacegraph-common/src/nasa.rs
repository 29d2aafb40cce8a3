//! NASA open API client
//!
//! This module fetches the near-Earth asteroid feed, the Astronomy Picture of
//! the Day and Mars rover photo listings, and normalizes each response into
//! flat records. Requests are best effort: a failed request yields a
//! [`FetchOutcome::Failed`] instead of an error, so a run always proceeds with
//! whatever data it could get.

use crate::error::{Result, SpaceGraphError};
use crate::models::{NeoFeedResponse, RoverPhotosResponse};
use crate::types::{ApodEntry, AsteroidRecord, DateInterval};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default public API host
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";

/// Rover queried when none is configured
pub const DEFAULT_ROVER: &str = "curiosity";

const FEED_PATH: &str = "neo/rest/v1/feed";
const APOD_PATH: &str = "planetary/apod";

/// Configuration for the NASA API client
#[derive(Clone)]
pub struct NasaConfig {
    /// Base URL of the API (e.g., "https://api.nasa.gov")
    pub base_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Rover whose photo listing is queried (default: "curiosity")
    pub rover: String,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            rover: DEFAULT_ROVER.to_string(),
        }
    }
}

impl NasaConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the rover name
    pub fn with_rover(mut self, rover: impl Into<String>) -> Self {
        self.rover = rover.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

// The API key stays out of logs.
impl fmt::Debug for NasaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NasaConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("rover", &self.rover)
            .finish()
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Issues GET requests. The seam between the client and the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request with the given query parameters.
    ///
    /// Returns `Err` only when no response was received at all.
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse>;
}

/// [`Transport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build the HTTP client with the given timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpaceGraphError::network_with_source("Failed to create HTTP client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<RawResponse> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// Why a fetch produced no data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    /// The API answered with a status other than 200
    #[error("HTTP status {0}")]
    Status(u16),
    /// No response was received
    #[error("request failed: {0}")]
    Transport(String),
    /// A 200 response whose body could not be decoded
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The request was never sent because its parameters are impossible
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result of a best-effort fetch.
///
/// Distinguishes "the API returned nothing" (`Fetched` with empty data) from
/// "the request failed" (`Failed`). [`FetchOutcome::data_or_default`] collapses
/// both into the empty/zero value used to keep a run going.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    Failed(FetchFailure),
}

impl<T> FetchOutcome<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Fetched(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::Failed(_) => None,
        }
    }

    /// Transform fetched data, keeping a failure as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            Self::Fetched(data) => FetchOutcome::Fetched(f(data)),
            Self::Failed(failure) => FetchOutcome::Failed(failure),
        }
    }

    /// Transform fetched data with a fallible step; its error becomes `Malformed`.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> FetchOutcome<U> {
        match self {
            Self::Fetched(data) => match f(data) {
                Ok(mapped) => FetchOutcome::Fetched(mapped),
                Err(e) => FetchOutcome::Failed(FetchFailure::Malformed(e.to_string())),
            },
            Self::Failed(failure) => FetchOutcome::Failed(failure),
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    /// Fetched data, or the empty/zero value when the fetch failed.
    pub fn data_or_default(self) -> T {
        self.into_data().unwrap_or_default()
    }
}

// ============================================================================
// Client
// ============================================================================

/// NASA API client
#[derive(Debug, Clone)]
pub struct NasaClient<T = ReqwestTransport> {
    transport: T,
    config: NasaConfig,
}

impl NasaClient<ReqwestTransport> {
    /// Create a client that talks to the network
    pub fn new(config: NasaConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> NasaClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(config: NasaConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &NasaConfig {
        &self.config
    }

    /// GET `path` and decode a 200 body as `R`.
    async fn get_json<R>(&self, path: &str, params: Vec<(String, String)>) -> FetchOutcome<R>
    where
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let mut query = params;
        query.push(("api_key".to_string(), self.config.api_key.clone()));

        debug!("Making request to: {}", url);

        let response = match self.transport.get(&url, &query).await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %path, "Request failed: {}", e);
                return FetchOutcome::Failed(FetchFailure::Transport(e.to_string()));
            }
        };

        if response.status != 200 {
            warn!(endpoint = %path, status = response.status, "API returned non-success status");
            return FetchOutcome::Failed(FetchFailure::Status(response.status));
        }

        match serde_json::from_str(&response.body) {
            Ok(decoded) => FetchOutcome::Fetched(decoded),
            Err(e) => {
                warn!(endpoint = %path, "Failed to decode response body: {}", e);
                FetchOutcome::Failed(FetchFailure::Malformed(e.to_string()))
            }
        }
    }

    fn range_params(start: NaiveDate, end: NaiveDate) -> Option<Vec<(String, String)>> {
        (start <= end).then(|| {
            vec![
                ("start_date".to_string(), start.to_string()),
                ("end_date".to_string(), end.to_string()),
            ]
        })
    }

    // ============================================================================
    // Public API Methods
    // ============================================================================

    /// Fetch the asteroid feed for an inclusive date range
    ///
    /// Returns one record per (feed date, asteroid) pair, each built from the
    /// asteroid's first close-approach entry.
    #[instrument(skip(self))]
    pub async fn fetch_asteroids(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FetchOutcome<Vec<AsteroidRecord>> {
        info!("Fetching asteroid feed");
        let Some(params) = Self::range_params(start, end) else {
            return FetchOutcome::Failed(FetchFailure::InvalidRequest(format!(
                "start {start} is after end {end}"
            )));
        };

        let outcome = self
            .get_json::<NeoFeedResponse>(FEED_PATH, params)
            .await
            .try_map(NeoFeedResponse::into_records);

        if let Some(records) = outcome.data() {
            info!(count = records.len(), "Fetched asteroid records");
        }
        outcome
    }

    /// Fetch APOD entries for an inclusive date range, one per day
    #[instrument(skip(self))]
    pub async fn fetch_apod(&self, start: NaiveDate, end: NaiveDate) -> FetchOutcome<Vec<ApodEntry>> {
        info!("Fetching astronomy pictures of the day");
        let Some(params) = Self::range_params(start, end) else {
            return FetchOutcome::Failed(FetchFailure::InvalidRequest(format!(
                "start {start} is after end {end}"
            )));
        };

        self.get_json(APOD_PATH, params).await
    }

    /// Fetch the image URLs the configured rover took on an Earth date
    #[instrument(skip(self))]
    pub async fn fetch_rover_photo_urls(&self, earth_date: NaiveDate) -> FetchOutcome<Vec<String>> {
        info!(rover = %self.config.rover, "Fetching rover photos");
        let path = format!("mars-photos/api/v1/rovers/{}/photos", self.config.rover);
        let params = vec![("earth_date".to_string(), earth_date.to_string())];

        self.get_json::<RoverPhotosResponse>(&path, params)
            .await
            .map(RoverPhotosResponse::image_urls)
    }

    /// [`Self::fetch_rover_photo_urls`] for a calendar day given as parts.
    /// An impossible day fails as `InvalidRequest` without a request.
    pub async fn rover_photo_urls(&self, year: i32, month: u32, day: u32) -> FetchOutcome<Vec<String>> {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(earth_date) => self.fetch_rover_photo_urls(earth_date).await,
            None => FetchOutcome::Failed(FetchFailure::InvalidRequest(format!(
                "{year}-{month:02}-{day:02} is not a calendar date"
            ))),
        }
    }

    /// Count the photos the configured rover took on a calendar day
    #[instrument(skip(self))]
    pub async fn count_rover_photos(&self, year: i32, month: u32, day: u32) -> FetchOutcome<usize> {
        self.rover_photo_urls(year, month, day).await.map(|urls| urls.len())
    }

    /// [`Self::fetch_asteroids`] over an interval
    pub async fn fetch_asteroids_in(&self, interval: &DateInterval) -> FetchOutcome<Vec<AsteroidRecord>> {
        self.fetch_asteroids(interval.start(), interval.end()).await
    }

    /// [`Self::fetch_apod`] over an interval
    pub async fn fetch_apod_in(&self, interval: &DateInterval) -> FetchOutcome<Vec<ApodEntry>> {
        self.fetch_apod(interval.start(), interval.end()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ok(body: &str) -> Result<RawResponse> {
        Ok(RawResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    fn client(transport: MockTransport) -> NasaClient<MockTransport> {
        NasaClient::with_transport(NasaConfig::new("https://api.example.test/", "test-key"), transport)
    }

    fn has_param(query: &[(String, String)], key: &str, value: &str) -> bool {
        query.iter().any(|(k, v)| k == key && v == value)
    }

    #[tokio::test]
    async fn test_fetch_asteroids_flattens_feed() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url, query| {
                url == "https://api.example.test/neo/rest/v1/feed"
                    && has_param(query, "start_date", "2024-09-01")
                    && has_param(query, "end_date", "2024-09-02")
                    && has_param(query, "api_key", "test-key")
            })
            .times(1)
            .returning(|_, _| ok(fixtures::NEO_FEED));

        let outcome = client(transport)
            .fetch_asteroids(date(2024, 9, 1), date(2024, 9, 2))
            .await;
        let records = outcome.into_data().unwrap();

        // Two dates, three asteroids in total.
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].approach_date, date(2024, 9, 1));
        assert_eq!(records[0].id, "2465633");
        assert!(records[0].hazardous);
        assert!(!records[1].hazardous);
        assert_eq!(records[2].approach_date, date(2024, 9, 2));
        // First of the two close-approach entries wins.
        assert_eq!(records[0].relative_velocity_km_s, 18.127_377_4);
    }

    #[tokio::test]
    async fn test_non_success_status_yields_empty_data() {
        let mut transport = MockTransport::new();
        transport.expect_get().times(3).returning(|_, _| {
            Ok(RawResponse {
                status: 429,
                body: r#"{"error": "OVER_RATE_LIMIT"}"#.to_string(),
            })
        });
        let client = client(transport);

        let asteroids = client.fetch_asteroids(date(2024, 9, 1), date(2024, 9, 7)).await;
        assert_eq!(asteroids.failure(), Some(&FetchFailure::Status(429)));
        assert!(asteroids.data_or_default().is_empty());

        let apod = client.fetch_apod(date(2024, 9, 1), date(2024, 9, 7)).await;
        assert_eq!(apod.failure(), Some(&FetchFailure::Status(429)));
        assert!(apod.data_or_default().is_empty());

        let photos = client.count_rover_photos(2015, 6, 3).await;
        assert_eq!(photos.failure(), Some(&FetchFailure::Status(429)));
        assert_eq!(photos.data_or_default(), 0);
    }

    #[tokio::test]
    async fn test_empty_feed_is_not_a_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_, _| ok(r#"{"element_count": 0, "near_earth_objects": {}}"#));

        let outcome = client(transport).fetch_asteroids(date(2024, 9, 1), date(2024, 9, 1)).await;
        assert_eq!(outcome, FetchOutcome::Fetched(Vec::new()));
    }

    #[tokio::test]
    async fn test_transport_error_is_reported_as_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .returning(|_, _| Err(SpaceGraphError::network("connection refused")));

        let outcome = client(transport).fetch_apod(date(2024, 9, 1), date(2024, 9, 7)).await;
        assert!(matches!(outcome.failure(), Some(FetchFailure::Transport(msg)) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported_as_failure() {
        let mut transport = MockTransport::new();
        transport.expect_get().returning(|_, _| ok("<html>maintenance</html>"));

        let outcome = client(transport).fetch_asteroids(date(2024, 9, 1), date(2024, 9, 7)).await;
        assert!(matches!(outcome.failure(), Some(FetchFailure::Malformed(_))));
    }

    #[tokio::test]
    async fn test_fetch_apod_decodes_entries() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url, query| {
                url.ends_with("/planetary/apod") && has_param(query, "start_date", "2024-09-01")
            })
            .returning(|_, _| ok(fixtures::APOD_RANGE));

        let entries = client(transport)
            .fetch_apod(date(2024, 9, 1), date(2024, 9, 2))
            .await
            .into_data()
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "The Andromeda Galaxy");
        assert_eq!(entries[1].media_type.as_deref(), Some("video"));
    }

    #[tokio::test]
    async fn test_count_rover_photos() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url, query| {
                url == "https://api.example.test/mars-photos/api/v1/rovers/curiosity/photos"
                    && has_param(query, "earth_date", "2015-06-03")
            })
            .returning(|_, _| ok(fixtures::ROVER_PHOTOS));

        let outcome = client(transport).count_rover_photos(2015, 6, 3).await;
        assert_eq!(outcome, FetchOutcome::Fetched(3));
    }

    #[tokio::test]
    async fn test_invalid_dates_never_reach_the_network() {
        let mut transport = MockTransport::new();
        transport.expect_get().never();
        let client = client(transport);

        let photos = client.count_rover_photos(2023, 2, 30).await;
        assert!(matches!(photos.failure(), Some(FetchFailure::InvalidRequest(_))));

        let urls = client.rover_photo_urls(2023, 2, 29).await;
        assert_eq!(
            urls.failure().map(ToString::to_string).as_deref(),
            Some("invalid request: 2023-02-29 is not a calendar date")
        );
        assert_eq!(
            photos.failure().map(ToString::to_string).as_deref(),
            Some("invalid request: 2023-02-30 is not a calendar date")
        );

        let asteroids = client.fetch_asteroids(date(2024, 9, 7), date(2024, 9, 1)).await;
        assert!(matches!(asteroids.failure(), Some(FetchFailure::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_identical_responses_yield_identical_records() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(2)
            .returning(|_, _| ok(fixtures::NEO_FEED));
        let client = client(transport);

        let first = client.fetch_asteroids(date(2024, 9, 1), date(2024, 9, 2)).await;
        let second = client.fetch_asteroids(date(2024, 9, 1), date(2024, 9, 2)).await;

        assert_eq!(
            serde_json::to_string(&first.into_data().unwrap()).unwrap(),
            serde_json::to_string(&second.into_data().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_outcome_combinators() {
        let fetched: FetchOutcome<Vec<u8>> = FetchOutcome::Fetched(vec![1, 2]);
        assert!(fetched.is_fetched());
        assert_eq!(fetched.clone().map(|v| v.len()), FetchOutcome::Fetched(2));

        let failed: FetchOutcome<Vec<u8>> = FetchOutcome::Failed(FetchFailure::Status(500));
        assert!(failed.is_failed());
        assert_eq!(failed.clone().map(|v| v.len()), FetchOutcome::Failed(FetchFailure::Status(500)));
        assert_eq!(failed.data_or_default(), Vec::<u8>::new());

        let broken = fetched.try_map(|_| -> Result<u8> { Err(SpaceGraphError::validation("bad date")) });
        assert!(matches!(broken, FetchOutcome::Failed(FetchFailure::Malformed(_))));
    }

    #[test]
    fn test_config_builders_and_redaction() {
        let config = NasaConfig::new("https://api.nasa.gov", "secret-key")
            .with_timeout(60)
            .with_rover("perseverance");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.rover, "perseverance");
        assert_eq!(config.endpoint(FEED_PATH), "https://api.nasa.gov/neo/rest/v1/feed");

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
