//! Deterministic SQL construction.

use geoprompt_core::models::{DataType, LatLon};

/// Rows returned when the configuration does not say otherwise
pub const DEFAULT_RESULT_LIMIT: u32 = 1000;

/// Kilometers per degree, used to express a radius in degrees
pub const KM_PER_DEGREE: f64 = 111.0;

/// Projection every query starts with: raw columns plus WKT geometry text
pub fn select_from(data_type: DataType) -> String {
    format!(
        "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('{}')",
        data_type.source_name()
    )
}

/// Distance predicate around `center`, radius given in kilometers
pub fn within_radius(center: LatLon, radius_km: f64) -> String {
    format!(
        "ST_DWithin(geometry, ST_Point({}, {}), {} / {:.1})",
        center.lon, center.lat, radius_km, KM_PER_DEGREE
    )
}

/// Template query for a dataset, optionally restricted to a radius.
pub fn template_query(data_type: DataType, center: Option<(LatLon, f64)>, limit: u32) -> String {
    match center {
        Some((point, radius_km)) => format!(
            "{} WHERE {} LIMIT {}",
            select_from(data_type),
            within_radius(point, radius_km),
            limit
        ),
        None => format!("{} LIMIT {}", select_from(data_type), limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_without_location() {
        let sql = template_query(DataType::Roads, None, DEFAULT_RESULT_LIMIT);
        assert_eq!(
            sql,
            "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('roads.parquet') LIMIT 1000"
        );
    }

    #[test]
    fn test_template_with_radius() {
        let tallinn = LatLon::new(59.437, 24.7536);
        let sql = template_query(DataType::Buildings, Some((tallinn, 5.0)), 1000);
        assert_eq!(
            sql,
            "SELECT *, ST_AsText(geometry) AS geometry_wkt FROM read_parquet('buildings.parquet') \
             WHERE ST_DWithin(geometry, ST_Point(24.7536, 59.437), 5 / 111.0) LIMIT 1000"
        );
    }

    #[test]
    fn test_fractional_radius() {
        let clause = within_radius(LatLon::new(58.378, 26.729), 2.5);
        assert!(clause.ends_with("2.5 / 111.0)"));
    }
}
