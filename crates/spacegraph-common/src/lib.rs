//! # SpaceGraph Common
//!
//! Shared types, the NASA API client, logging and error handling for SpaceGraph.
//!
//! This crate provides the foundational types and the data-shaping step used
//! across all other crates in the workspace: raw API responses go in, flat
//! [`AsteroidRecord`] and [`ApodEntry`] sequences come out.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod models;
pub mod nasa;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, SpaceGraphError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use nasa::{
    FetchFailure, FetchOutcome, NasaClient, NasaConfig, RawResponse, ReqwestTransport, Transport,
    DEFAULT_BASE_URL, DEFAULT_ROVER,
};
pub use types::*;
