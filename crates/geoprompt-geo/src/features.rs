//! Row to feature conversion.

use geoprompt_core::models::{Feature, Geometry, Row};
use serde_json::Value;

use crate::wkt::parse_wkt;

/// Columns that may carry WKT text, in lookup order
pub const WKT_FIELDS: [&str; 5] = ["geometry_wkt", "wkt", "geometry", "geom", "shape"];

/// Geometry-ish columns removed from feature properties
pub const GEOMETRY_KEYS: [&str; 12] = [
    "geometry",
    "geometry_wkt",
    "geom",
    "shape",
    "wkt",
    "coordinates",
    "lon",
    "lat",
    "longitude",
    "latitude",
    "x",
    "y",
];

fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn point_from_columns(row: &Row, lon_key: &str, lat_key: &str) -> Option<Geometry> {
    let lon = coordinate(row.get(lon_key)?)?;
    let lat = coordinate(row.get(lat_key)?)?;
    Some(Geometry::point(lon, lat))
}

/// Derive a geometry from one result row.
///
/// The first string-valued WKT column wins, and unparseable text yields
/// `None`. Without a WKT column, `lon`/`lat` or `longitude`/`latitude` build a
/// point; a row with neither lands on the origin rather than being dropped.
pub fn geometry_from_row(row: &Row) -> Option<Geometry> {
    if let Some(text) = WKT_FIELDS.iter().find_map(|key| row.get(*key).and_then(Value::as_str)) {
        return parse_wkt(text);
    }

    point_from_columns(row, "lon", "lat")
        .or_else(|| point_from_columns(row, "longitude", "latitude"))
        .or(Some(Geometry::point(0.0, 0.0)))
}

/// Convert a batch of rows into features with sequential ids from 0.
pub fn rows_to_features(rows: &[Row]) -> Vec<Feature> {
    let features: Vec<Feature> = rows
        .iter()
        .enumerate()
        .map(|(id, row)| {
            let properties: Row = row
                .iter()
                .filter(|(key, _)| !GEOMETRY_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            Feature::new(id, geometry_from_row(row), properties)
        })
        .collect();

    let missing = features.iter().filter(|f| !f.has_geometry()).count();
    if missing > 0 {
        tracing::debug!(features = features.len(), missing, "some rows had unparseable geometry");
    }
    features
}
