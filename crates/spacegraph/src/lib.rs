//! # SpaceGraph
//!
//! Fetches NASA near-Earth asteroid feeds, Astronomy Pictures of the Day and
//! Mars rover photo listings, then prints an APOD report and renders
//! comparison charts.
//!
//! This is the main binary crate that runs the whole collection and
//! rendering pass once.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod pipeline;

pub use error::*;
pub use pipeline::*;
