use serde::{Deserialize, Serialize};

use super::geometry::{Geometry, GeometryType};

/// One result row: column name to normalized value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Spatial feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Sequential index within one conversion batch (not globally stable)
    pub id: usize,

    /// None when the source geometry text could not be parsed
    pub geometry: Option<Geometry>,

    /// Remaining attribute columns
    pub properties: Row,
}

impl Feature {
    /// Create a new feature
    pub fn new(id: usize, geometry: Option<Geometry>, properties: Row) -> Self {
        Self { id, geometry, properties }
    }

    /// Check if this feature has geometry
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.geometry.as_ref().map(Geometry::geometry_type)
    }
}

/// Ordered collection of features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
