//! Settings model for allrun.
//!
//! This module defines the Settings struct that represents `allrun.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! defaults for every field, and validation of settings values.

mod model;
mod operations;
pub mod types;


pub use model::Settings;
pub use types::SETTINGS_FILE;
