//! Geometry models for geoprompt-geo.
//!
//! This module re-exports canonical types from `geoprompt-core` and provides
//! the conversion from `geo` crate types used by the strict WKT path.

use geo::Geometry as GeoGeometry;

// Re-export canonical types from geoprompt-core
pub use geoprompt_core::models::{BoundingBox, Feature, Geometry, GeometryType};

fn ring_coords(ring: &geo::LineString) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

fn polygon_rings(polygon: &geo::Polygon) -> Vec<Vec<[f64; 2]>> {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(ring_coords(polygon.exterior()));
    for interior in polygon.interiors() {
        rings.push(ring_coords(interior));
    }
    rings
}

/// Convert a geo::Geometry to a canonical Geometry
///
/// Returns `None` for geometry collections, which have no single canonical shape.
pub fn from_geo_geometry(geom: &GeoGeometry) -> Option<Geometry> {
    let geometry = match geom {
        GeoGeometry::Point(p) => Geometry::Point { coordinates: [p.x(), p.y()] },
        GeoGeometry::Line(l) => Geometry::LineString {
            coordinates: vec![[l.start.x, l.start.y], [l.end.x, l.end.y]],
        },
        GeoGeometry::LineString(ls) => Geometry::LineString { coordinates: ring_coords(ls) },
        GeoGeometry::Polygon(p) => Geometry::Polygon { coordinates: polygon_rings(p) },
        GeoGeometry::MultiPoint(mp) => Geometry::MultiPoint {
            coordinates: mp.iter().map(|p| [p.x(), p.y()]).collect(),
        },
        GeoGeometry::MultiLineString(mls) => Geometry::MultiLineString {
            coordinates: mls.iter().map(ring_coords).collect(),
        },
        GeoGeometry::MultiPolygon(mp) => Geometry::MultiPolygon {
            coordinates: mp.iter().map(polygon_rings).collect(),
        },
        GeoGeometry::Rect(r) => return from_geo_geometry(&GeoGeometry::Polygon(r.to_polygon())),
        GeoGeometry::Triangle(t) => {
            return from_geo_geometry(&GeoGeometry::Polygon(t.to_polygon()))
        }
        GeoGeometry::GeometryCollection(_) => return None,
    };
    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversion() {
        let geo_point = GeoGeometry::Point(geo::Point::new(26.72, 58.38));
        let converted = from_geo_geometry(&geo_point).unwrap();
        assert_eq!(converted, Geometry::point(26.72, 58.38));
    }

    #[test]
    fn test_polygon_with_hole_keeps_rings() {
        let polygon = geo::Polygon::new(
            geo::LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![geo::LineString::from(vec![(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 2.0)])],
        );
        let converted = from_geo_geometry(&GeoGeometry::Polygon(polygon)).unwrap();

        match converted {
            Geometry::Polygon { coordinates } => {
                assert_eq!(coordinates.len(), 2);
                assert_eq!(coordinates[0].len(), 5);
                assert_eq!(coordinates[1].len(), 4);
            }
            other => panic!("Expected Polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_collection_has_no_canonical_form() {
        let collection = GeoGeometry::GeometryCollection(geo::GeometryCollection::default());
        assert!(from_geo_geometry(&collection).is_none());
    }
}
