//! GeoPrompt Geo - Geometry codec, bounding boxes, and place resolution
//!
//! This crate turns engine rows into GeoJSON-shaped features: WKT parsing
//! (strict through the `wkt` crate, lenient for damaged text), row to feature
//! conversion, bounding boxes, Web Mercator viewport fitting, and the place
//! resolvers used to center the map on a named location.

pub mod bbox;
pub mod features;
pub mod models;
pub mod places;
pub mod viewport;
pub mod wkt;

pub use bbox::bounding_box;
pub use features::{geometry_from_row, rows_to_features, GEOMETRY_KEYS};
pub use places::{fold_place_name, known_city, NominatimResolver, PlaceResolver, StaticPlaceResolver, KNOWN_CITIES};
pub use viewport::{fit_bounds, FittedView, MAX_FIT_ZOOM};
pub use self::wkt::parse_wkt;
