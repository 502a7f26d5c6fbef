//! Property tests for the geometry codec

use geoprompt_core::models::{Feature, Geometry, GeometryType, Row};
use geoprompt_geo::{bounding_box, parse_wkt};
use proptest::prelude::*;

fn arb_position() -> impl Strategy<Value = [f64; 2]> {
    (-180.0f64..180.0, -85.0f64..85.0).prop_map(|(lon, lat)| [lon, lat])
}

fn arb_closed_ring() -> impl Strategy<Value = Vec<[f64; 2]>> {
    prop::collection::vec(arb_position(), 3..8).prop_map(|mut ring| {
        ring.push(ring[0]);
        ring
    })
}

fn wkt_positions(positions: &[[f64; 2]]) -> String {
    positions
        .iter()
        .map(|[x, y]| format!("{} {}", x, y))
        .collect::<Vec<_>>()
        .join(", ")
}

fn wkt_rings(rings: &[Vec<[f64; 2]>]) -> String {
    rings
        .iter()
        .map(|ring| format!("({})", wkt_positions(ring)))
        .collect::<Vec<_>>()
        .join(", ")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// POINT decodes to the same position
    #[test]
    fn point_round_trips(position in arb_position()) {
        let text = format!("POINT ({} {})", position[0], position[1]);
        let geometry = parse_wkt(&text).unwrap();
        prop_assert_eq!(geometry, Geometry::Point { coordinates: position });
    }

    /// LINESTRING keeps coordinate count and order
    #[test]
    fn linestring_keeps_count_and_order(positions in prop::collection::vec(arb_position(), 2..20)) {
        let text = format!("LINESTRING ({})", wkt_positions(&positions));
        let geometry = parse_wkt(&text).unwrap();
        prop_assert_eq!(geometry.geometry_type(), GeometryType::LineString);
        prop_assert_eq!(geometry.positions(), positions);
    }

    /// POLYGON keeps every ring with its positions
    #[test]
    fn polygon_keeps_rings(rings in prop::collection::vec(arb_closed_ring(), 1..4)) {
        let text = format!("POLYGON ({})", wkt_rings(&rings));
        let geometry = parse_wkt(&text).unwrap();
        prop_assert_eq!(geometry.geometry_type(), GeometryType::Polygon);
        let expected: Vec<[f64; 2]> = rings.iter().flatten().copied().collect();
        prop_assert_eq!(geometry.positions(), expected);
    }

    /// MULTIPOLYGON keeps every part
    #[test]
    fn multipolygon_keeps_parts(
        parts in prop::collection::vec(prop::collection::vec(arb_closed_ring(), 1..3), 1..4)
    ) {
        let body = parts
            .iter()
            .map(|rings| format!("({})", wkt_rings(rings)))
            .collect::<Vec<_>>()
            .join(", ");
        let geometry = parse_wkt(&format!("MULTIPOLYGON ({})", body)).unwrap();

        match &geometry {
            Geometry::MultiPolygon { coordinates } => prop_assert_eq!(coordinates, &parts),
            other => prop_assert!(false, "expected MultiPolygon, got {:?}", other),
        }
    }

    /// A damaged ordinate becomes NaN without shifting its neighbours
    #[test]
    fn damaged_ordinate_stays_in_place(
        positions in prop::collection::vec(arb_position(), 2..10),
        damaged in any::<prop::sample::Index>(),
    ) {
        let damaged = damaged.index(positions.len());
        let body = positions
            .iter()
            .enumerate()
            .map(|(i, [x, y])| if i == damaged { format!("{} n/a", x) } else { format!("{} {}", x, y) })
            .collect::<Vec<_>>()
            .join(", ");

        let decoded = parse_wkt(&format!("LINESTRING ({})", body)).unwrap().positions();
        prop_assert_eq!(decoded.len(), positions.len());
        for (i, (got, want)) in decoded.iter().zip(&positions).enumerate() {
            prop_assert_eq!(got[0], want[0]);
            if i == damaged {
                prop_assert!(got[1].is_nan());
            } else {
                prop_assert_eq!(got[1], want[1]);
            }
        }
    }

    /// Every position lies inside the bounding box
    #[test]
    fn bounding_box_contains_all_positions(
        positions in prop::collection::vec(arb_position(), 1..30)
    ) {
        let features: Vec<Feature> = positions
            .iter()
            .enumerate()
            .map(|(id, [lon, lat])| Feature::new(id, Some(Geometry::point(*lon, *lat)), Row::new()))
            .collect();

        let bbox = bounding_box(&features).unwrap();
        prop_assert!(bbox.min_lon <= bbox.max_lon);
        prop_assert!(bbox.min_lat <= bbox.max_lat);
        for [lon, lat] in positions {
            prop_assert!(lon >= bbox.min_lon && lon <= bbox.max_lon);
            prop_assert!(lat >= bbox.min_lat && lat <= bbox.max_lat);
        }
    }
}
