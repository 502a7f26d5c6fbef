//! GeoPrompt Core - Domain models, errors, and configuration
//!
//! This crate contains the shared domain types for the GeoPrompt system:
//! query intents, GeoJSON-shaped geometries and features, viewports, the
//! error taxonomy, and layered configuration.

pub mod config;
pub mod error;
pub mod models;

pub use error::{GeopromptError, QueryExecutionError, Result};
