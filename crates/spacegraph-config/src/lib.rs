//! # SpaceGraph Config
//!
//! Type-safe configuration management for SpaceGraph.
//!
//! This crate provides configuration loading from YAML or TOML files,
//! environment overrides, and validation.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
