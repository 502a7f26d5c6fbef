//! GeoJSON and CSV export of selected layers.

use std::str::FromStr;

use chrono::NaiveDate;
use geoprompt_core::models::{Feature, Geometry};
use geoprompt_core::{GeopromptError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::layer::Layer;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    GeoJson,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "geojson",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "application/geo+json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = GeopromptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "geojson" | "json" => Ok(ExportFormat::GeoJson),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(GeopromptError::Export(format!(
                "Unknown export format '{}'. Expected geojson or csv",
                other
            ))),
        }
    }
}

/// A finished export: file name, media type and body
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `geoprompt-export-YYYY-MM-DD.<ext>`
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("geoprompt-export-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

fn geojson_geometry(geometry: &Geometry) -> geojson::Geometry {
    let position = |c: &[f64; 2]| c.to_vec();
    let line = |coords: &Vec<[f64; 2]>| coords.iter().map(position).collect::<Vec<_>>();
    let rings = |rings: &Vec<Vec<[f64; 2]>>| rings.iter().map(line).collect::<Vec<_>>();

    let value = match geometry {
        Geometry::Point { coordinates } => geojson::Value::Point(position(coordinates)),
        Geometry::LineString { coordinates } => geojson::Value::LineString(line(coordinates)),
        Geometry::MultiPoint { coordinates } => geojson::Value::MultiPoint(line(coordinates)),
        Geometry::Polygon { coordinates } => geojson::Value::Polygon(rings(coordinates)),
        Geometry::MultiLineString { coordinates } => {
            geojson::Value::MultiLineString(rings(coordinates))
        }
        Geometry::MultiPolygon { coordinates } => {
            geojson::Value::MultiPolygon(coordinates.iter().map(rings).collect())
        }
    };
    geojson::Geometry::new(value)
}

fn stamped_feature(feature: &Feature, layer: &Layer) -> geojson::Feature {
    let mut properties = feature.properties.clone();
    properties.insert("layer_name".to_string(), Value::from(layer.name.clone()));
    properties.insert("layer_id".to_string(), Value::from(layer.id.0));

    geojson::Feature {
        bbox: None,
        geometry: feature.geometry.as_ref().map(geojson_geometry),
        id: Some(geojson::feature::Id::Number(feature.id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Merge the features of `layers` into one collection.
///
/// Each feature's properties gain `layer_name` and `layer_id`; the layers
/// themselves are not modified.
pub fn export_geojson(layers: &[&Layer]) -> geojson::FeatureCollection {
    let features = layers
        .iter()
        .flat_map(|layer| layer.data.features.iter().map(move |feature| stamped_feature(feature, layer)))
        .collect();

    geojson::FeatureCollection { bbox: None, features, foreign_members: None }
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn csv_row(feature: &Feature) -> Map<String, Value> {
    let mut row = feature.properties.clone();
    let (geometry_type, coordinates) = match &feature.geometry {
        Some(geometry) => (
            Value::from(geometry.geometry_type().as_str()),
            Value::from(geometry.coordinates_json().to_string()),
        ),
        None => (Value::Null, Value::Null),
    };
    row.insert("geometry_type".to_string(), geometry_type);
    row.insert("coordinates".to_string(), coordinates);
    row
}

/// Flatten `layers` into CSV text.
///
/// Columns are the first row's keys. Later rows are projected onto that
/// header: keys it lacks are dropped and missing keys become empty cells.
pub fn export_csv(layers: &[&Layer]) -> Result<String> {
    let rows: Vec<Map<String, Value>> = layers
        .iter()
        .flat_map(|layer| layer.data.features.iter().map(csv_row))
        .collect();

    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let header: Vec<String> = first.keys().cloned().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header).map_err(|e| GeopromptError::Export(e.to_string()))?;
    for row in &rows {
        let record = header.iter().map(|key| row.get(key).map(csv_cell).unwrap_or_default());
        writer.write_record(record).map_err(|e| GeopromptError::Export(e.to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| GeopromptError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| GeopromptError::Export(e.to_string()))
}

/// Serialize `layers` in `format`, named for `date`
pub fn export(layers: &[&Layer], format: ExportFormat, date: NaiveDate) -> Result<ExportDocument> {
    let bytes = match format {
        ExportFormat::GeoJson => serde_json::to_vec_pretty(&export_geojson(layers))
            .map_err(|e| GeopromptError::Serialization(e.to_string()))?,
        ExportFormat::Csv => export_csv(layers)?.into_bytes(),
    };

    tracing::info!(
        format = format.extension(),
        layers = layers.len(),
        bytes = bytes.len(),
        "export built"
    );

    Ok(ExportDocument {
        filename: export_filename(format, date),
        content_type: format.content_type(),
        bytes,
    })
}
