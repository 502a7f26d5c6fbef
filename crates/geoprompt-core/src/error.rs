//! Error types for GeoPrompt

use std::path::PathBuf;
use thiserror::Error;

/// A failed query against the dataset engine.
///
/// Carries the engine's message verbatim so it can be shown to the user as the
/// failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Query execution failed: {message}")]
pub struct QueryExecutionError {
    pub message: String,
}

impl QueryExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum GeopromptError {
    // Engine setup errors
    #[error("Dataset engine setup failed: {reason}")]
    EngineSetup { reason: String },

    #[error("Dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Invalid dataset file for {name}: {reason}")]
    InvalidDatasetFile { name: String, reason: String },

    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    // Query errors
    #[error(transparent)]
    QueryExecution(#[from] QueryExecutionError),

    // Reasoning service errors
    #[error("Generator unavailable: {reason}. Try: {remediation}")]
    GeneratorUnavailable {
        reason: String,
        remediation: String,
    },

    // Geocoding errors
    #[error("Place resolution failed: {reason}")]
    PlaceResolution { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Export errors
    #[error("Export failed: {0}")]
    Export(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeopromptError {
    /// Whether this error leaves the dataset engine unusable until restart.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GeopromptError::EngineSetup { .. }
                | GeopromptError::DatasetNotFound { .. }
                | GeopromptError::InvalidDatasetFile { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeopromptError>;
