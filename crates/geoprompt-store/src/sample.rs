//! Small built-in datasets for demos without dataset files.

use crate::memory::MemoryEngine;
use crate::ports::{EngineRow, EngineValue};

fn building(osm_id: i64, name: &str, kind: &str, height: f64, levels: i64, wkt: &str) -> EngineRow {
    vec![
        ("osm_id".to_string(), EngineValue::Int(osm_id)),
        ("name".to_string(), EngineValue::from(name)),
        ("building".to_string(), EngineValue::from(kind)),
        ("height".to_string(), EngineValue::Float(height)),
        ("levels".to_string(), EngineValue::Int(levels)),
        ("geometry_wkt".to_string(), EngineValue::from(wkt)),
    ]
}

fn road(osm_id: i64, name: &str, highway: &str, maxspeed: Option<i64>, wkt: &str) -> EngineRow {
    vec![
        ("osm_id".to_string(), EngineValue::Int(osm_id)),
        ("name".to_string(), EngineValue::from(name)),
        ("highway".to_string(), EngineValue::from(highway)),
        ("maxspeed".to_string(), maxspeed.map(EngineValue::Int).unwrap_or(EngineValue::Null)),
        ("geometry_wkt".to_string(), EngineValue::from(wkt)),
    ]
}

fn landuse(osm_id: i64, name: &str, kind: &str, wkt: &str) -> EngineRow {
    vec![
        ("osm_id".to_string(), EngineValue::Int(osm_id)),
        ("name".to_string(), EngineValue::from(name)),
        ("landuse".to_string(), EngineValue::from(kind)),
        ("geometry_wkt".to_string(), EngineValue::from(wkt)),
    ]
}

impl MemoryEngine {
    /// Engine holding a handful of Tartu and Tallinn features
    pub fn with_sample_data() -> Self {
        let engine = MemoryEngine::new();

        engine.insert_rows(
            "buildings",
            vec![
                building(
                    101,
                    "Tartu Raekoda",
                    "civic",
                    22.0,
                    3,
                    "POLYGON ((26.7221 58.3805, 26.7226 58.3805, 26.7226 58.3808, 26.7221 58.3808, 26.7221 58.3805))",
                ),
                building(
                    102,
                    "Tigutorn",
                    "apartments",
                    75.0,
                    24,
                    "POLYGON ((26.7325 58.3778, 26.7331 58.3778, 26.7331 58.3781, 26.7325 58.3781, 26.7325 58.3778))",
                ),
                building(
                    103,
                    "Ülikooli peahoone",
                    "university",
                    18.5,
                    3,
                    "POLYGON ((26.7196 58.3810, 26.7204 58.3810, 26.7204 58.3814, 26.7196 58.3814, 26.7196 58.3810))",
                ),
                building(
                    201,
                    "Swissôtel Tallinn",
                    "commercial",
                    117.0,
                    30,
                    "POLYGON ((24.7609 59.4338, 24.7616 59.4338, 24.7616 59.4342, 24.7609 59.4342, 24.7609 59.4338))",
                ),
            ],
        );

        engine.insert_rows(
            "roads",
            vec![
                road(301, "Riia", "primary", Some(50), "LINESTRING (26.7160 58.3760, 26.7230 58.3790, 26.7290 58.3800)"),
                road(302, "Emajõe promenaad", "cycleway", None, "LINESTRING (26.7240 58.3830, 26.7270 58.3815, 26.7300 58.3800)"),
                road(303, "Tallinn-Tartu maantee", "trunk", Some(90), "LINESTRING (24.8000 59.4000, 25.5000 58.9000, 26.6500 58.4200)"),
            ],
        );

        engine.insert_rows(
            "landuse",
            vec![
                landuse(
                    401,
                    "Toomemägi",
                    "grass",
                    "POLYGON ((26.7150 58.3790, 26.7200 58.3790, 26.7200 58.3820, 26.7150 58.3820, 26.7150 58.3790))",
                ),
                landuse(
                    402,
                    "Kadriorg",
                    "residential",
                    "MULTIPOLYGON (((24.7850 59.4370, 24.7950 59.4370, 24.7950 59.4420, 24.7850 59.4420, 24.7850 59.4370)), ((24.7960 59.4380, 24.8000 59.4380, 24.8000 59.4400, 24.7960 59.4380)))",
                ),
            ],
        );

        engine
    }
}
