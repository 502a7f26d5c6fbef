use geoprompt_core::models::{BoundingBox, Feature};

/// Bounding box over every coordinate of every feature with geometry.
///
/// Returns `None` for an empty list or when no finite coordinates were seen.
/// NaN ordinates are ignored.
pub fn bounding_box(features: &[Feature]) -> Option<BoundingBox> {
    let mut bbox = BoundingBox::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

    for geometry in features.iter().filter_map(|f| f.geometry.as_ref()) {
        for [lon, lat] in geometry.positions() {
            bbox.min_lon = bbox.min_lon.min(lon);
            bbox.max_lon = bbox.max_lon.max(lon);
            bbox.min_lat = bbox.min_lat.min(lat);
            bbox.max_lat = bbox.max_lat.max(lat);
        }
    }

    let finite = [bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat]
        .iter()
        .all(|v| v.is_finite());
    finite.then_some(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoprompt_core::models::{Geometry, Row};

    fn feature(geometry: Option<Geometry>) -> Feature {
        Feature::new(0, geometry, Row::new())
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(bounding_box(&[]), None);
    }

    #[test]
    fn test_single_point() {
        let bbox = bounding_box(&[feature(Some(Geometry::point(26.7, 58.3)))]).unwrap();
        assert_eq!(bbox, BoundingBox::new(26.7, 58.3, 26.7, 58.3));
    }

    #[test]
    fn test_features_without_geometry_are_skipped() {
        assert_eq!(bounding_box(&[feature(None)]), None);

        let bbox = bounding_box(&[
            feature(None),
            feature(Some(Geometry::line_string(vec![[24.0, 59.0], [25.0, 58.0]]))),
        ])
        .unwrap();
        assert_eq!(bbox, BoundingBox::new(24.0, 58.0, 25.0, 59.0));
    }

    #[test]
    fn test_multipolygon_depth() {
        let bbox = bounding_box(&[feature(Some(Geometry::multi_polygon(vec![
            vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
            vec![vec![[5.0, 5.0], [6.0, 5.0], [6.0, 7.0], [5.0, 5.0]]],
        ])))])
        .unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 6.0, 7.0));
    }

    #[test]
    fn test_nan_ordinates_are_ignored() {
        let bbox = bounding_box(&[feature(Some(Geometry::line_string(vec![
            [f64::NAN, 58.0],
            [24.0, f64::NAN],
            [25.0, 59.0],
        ])))])
        .unwrap();
        assert_eq!(bbox, BoundingBox::new(24.0, 58.0, 25.0, 59.0));
    }

    #[test]
    fn test_all_nan_yields_none() {
        let nan_point = Geometry::point(f64::NAN, f64::NAN);
        assert_eq!(bounding_box(&[feature(Some(nan_point))]), None);
    }
}
