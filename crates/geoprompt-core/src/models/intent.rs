use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeopromptError;

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// The three pre-built datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Buildings,
    Roads,
    Landuse,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Buildings, DataType::Roads, DataType::Landuse];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Buildings => "buildings",
            DataType::Roads => "roads",
            DataType::Landuse => "landuse",
        }
    }

    /// Name under which the dataset file is registered with the engine
    pub fn source_name(&self) -> String {
        format!("{}.parquet", self.as_str())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = GeopromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buildings" | "building" => Ok(DataType::Buildings),
            "roads" | "road" => Ok(DataType::Roads),
            "landuse" => Ok(DataType::Landuse),
            _ => Err(GeopromptError::UnknownDataset { name: s.to_string() }),
        }
    }
}

/// Structured, executable interpretation of a free-text request.
///
/// Field names follow the JSON shape the reasoning service is asked to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryIntent {
    pub data_type: DataType,

    #[serde(default)]
    pub location: Option<String>,

    /// Kilometers
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Informational only; already folded into `query`
    #[serde(default)]
    pub filters: serde_json::Map<String, serde_json::Value>,

    /// Executable SQL, the single source of truth for execution
    pub query: String,

    #[serde(default)]
    pub explanation: String,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_KM
}

impl QueryIntent {
    pub fn new(data_type: DataType, query: impl Into<String>) -> Self {
        Self {
            data_type,
            location: None,
            radius: DEFAULT_RADIUS_KM,
            filters: serde_json::Map::new(),
            query: query.into(),
            explanation: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Replace a non-positive or non-finite radius with the default and trim
    /// an empty location away.
    pub fn normalized(mut self) -> Self {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            self.radius = DEFAULT_RADIUS_KM;
        }
        if self.location.as_deref().is_some_and(|l| l.trim().is_empty()) {
            self.location = None;
        }
        self
    }

    /// An intent is executable when it carries a non-empty query
    pub fn is_executable(&self) -> bool {
        !self.query.trim().is_empty()
    }
}
