//! # SpaceGraph Graphs
//!
//! Aggregation of fetched NASA records and chart rendering with plotters.
//!
//! Every chart is first built as a plain model (labels, values, colors and
//! titles) and only then drawn, so the numbers a chart shows can be checked
//! without a drawing backend.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod manager;
pub mod report;
pub mod traits;
pub mod types;
pub mod utils;

// Chart implementations
pub mod apod_comparison;
pub mod asteroid_comparison;
pub mod rover_photos;

pub use aggregator::*;
pub use apod_comparison::ApodComparisonChart;
pub use asteroid_comparison::{AsteroidComparison, AsteroidComparisonChart};
pub use manager::*;
pub use report::{interval_label, render_detail};
pub use rover_photos::{RoverDay, RoverPhotosChart, YearPhotoCount};
pub use traits::*;
pub use types::*;
