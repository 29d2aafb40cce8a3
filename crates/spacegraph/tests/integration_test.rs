//! Integration tests for spacegraph crate.
//!
//! These tests drive a full collection pass against a stub transport and
//! check what a user sees on stdout.

use async_trait::async_trait;
use spacegraph::{AppError, Pipeline};
use spacegraph_common::test_utils::{fixtures, init_test_logging};
use spacegraph_common::{
    NasaClient, NasaConfig, RawResponse, Result, SpaceGraphError, Transport,
};
use spacegraph_config::Config;

/// Rejects every request with the given status.
struct StatusTransport(u16);

#[async_trait]
impl Transport for StatusTransport {
    async fn get(&self, _url: &str, _query: &[(String, String)]) -> Result<RawResponse> {
        Ok(RawResponse {
            status: self.0,
            body: String::new(),
        })
    }
}

/// Serves the canned fixtures for every request.
struct FixtureTransport;

#[async_trait]
impl Transport for FixtureTransport {
    async fn get(&self, url: &str, _query: &[(String, String)]) -> Result<RawResponse> {
        let body = if url.contains("/feed") {
            fixtures::NEO_FEED
        } else if url.contains("/apod") {
            fixtures::APOD_RANGE
        } else {
            fixtures::ROVER_PHOTOS
        };
        Ok(RawResponse {
            status: 200,
            body: body.to_string(),
        })
    }
}

fn client<T: Transport>(transport: T) -> NasaClient<T> {
    NasaClient::with_transport(NasaConfig::new("https://api.nasa.gov", "DEMO_KEY"), transport)
}

#[tokio::test]
async fn test_every_request_failing_still_completes() {
    init_test_logging();
    let config = Config::default();
    let pipeline = Pipeline::new(&config, client(StatusTransport(429)));
    let mut out = Vec::new();

    let collected = pipeline.collect(&mut out).await.unwrap();
    pipeline.report(&collected, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // Two feeds, two APOD ranges, two rover days.
    assert_eq!(collected.failures, 6);
    assert_eq!(text.matches("Error: HTTP status 429\n").count(), 6);
    assert!(collected.asteroids.is_empty());
    assert!(collected.apod.iter().all(Vec::is_empty));
    assert!(collected.rover_counts.iter().all(|c| c.count == 0));
    // Headings are still printed for empty intervals.
    assert!(text.contains("APOD for 2005-09-01 to 2005-09-07:\n"));
}

#[tokio::test]
async fn test_stdout_order() {
    let config = Config::default();
    let pipeline = Pipeline::new(&config, client(FixtureTransport));
    let mut out = Vec::new();

    let collected = pipeline.collect(&mut out).await.unwrap();
    pipeline.report(&collected, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let first_url = text.find("msl-raw-images/1.JPG").unwrap();
    let first_heading = text.find("APOD for ").unwrap();
    assert!(first_url < first_heading);
    assert_eq!(collected.failures, 0);
    // Both intervals got the same fixture; rows are tagged oldest year first.
    assert_eq!(collected.asteroids.rows()[0].year, 2005);
    assert_eq!(collected.asteroids.len(), 6);
}

#[test]
fn test_app_error_messages() {
    let err = AppError::Config(SpaceGraphError::validation_field(
        "NASA API key cannot be empty",
        "nasa.api_key",
    ));
    assert!(err.to_string().starts_with("Configuration error:"));
    assert!(std::error::Error::source(&err).is_some());
}
