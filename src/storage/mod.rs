//! Storage Layer
//!
//! Handles the JSON config file. The view-model itself is never persisted.

pub mod config;

pub use config::*;
