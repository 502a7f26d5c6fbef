//! Fitting a camera to bounds in Web Mercator.

use std::f64::consts::PI;

use geoprompt_core::models::BoundingBox;

/// Upper zoom bound for fitted views (single points would otherwise zoom forever)
pub const MAX_FIT_ZOOM: f64 = 16.0;

/// World size in pixels at zoom 0
const TILE_SIZE: f64 = 512.0;

/// Latitude limit of the Web Mercator projection
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Center and zoom produced by [`fit_bounds`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

/// Project to normalized Web Mercator, both axes in [0, 1], y growing south
fn project(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - (PI / 4.0 + lat / 2.0).tan().ln() / PI) / 2.0;
    (x, y)
}

fn unproject(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 360.0 - 180.0;
    let lat = (2.0 * (PI * (1.0 - 2.0 * y)).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Fit `bbox` into a `width` by `height` pixel viewport, keeping `padding`
/// pixels free on every side. Zoom is clamped to `[0, MAX_FIT_ZOOM]`.
pub fn fit_bounds(bbox: &BoundingBox, width: f64, height: f64, padding: f64) -> FittedView {
    let (x0, y0) = project(bbox.min_lon, bbox.max_lat);
    let (x1, y1) = project(bbox.max_lon, bbox.min_lat);

    let available_width = (width - 2.0 * padding).max(1.0);
    let available_height = (height - 2.0 * padding).max(1.0);

    let span_x = (x1 - x0).abs() * TILE_SIZE;
    let span_y = (y1 - y0).abs() * TILE_SIZE;

    let scale = match (span_x > 0.0, span_y > 0.0) {
        (true, true) => (available_width / span_x).min(available_height / span_y),
        (true, false) => available_width / span_x,
        (false, true) => available_height / span_y,
        (false, false) => f64::INFINITY,
    };
    let zoom = if scale.is_finite() { scale.log2() } else { MAX_FIT_ZOOM };

    let (longitude, latitude) = unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    FittedView { longitude, latitude, zoom: zoom.clamp(0.0, MAX_FIT_ZOOM) }
}
