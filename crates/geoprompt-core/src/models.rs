pub mod feature;
pub mod geometry;
pub mod intent;
pub mod viewport;

pub use feature::{Feature, FeatureCollection, Row};
pub use geometry::{BoundingBox, Geometry, GeometryType};
pub use intent::{DataType, QueryIntent, DEFAULT_RADIUS_KM};
pub use viewport::{LatLon, Viewport, ViewportChange};
