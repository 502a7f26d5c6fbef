use serde::{Deserialize, Serialize};

/// A resolved place position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Camera state handed to the map renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    /// Pixels kept free around fitted bounds
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        // Estonia
        Self {
            longitude: 25.0,
            latitude: 58.6,
            zoom: 7.0,
            pitch: 0.0,
            bearing: 0.0,
            padding: 40.0,
        }
    }
}

/// Camera change event from the renderer. Padding is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportChange {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

impl Viewport {
    /// Same camera, new center and zoom
    pub fn centered(self, longitude: f64, latitude: f64, zoom: f64) -> Self {
        Self { longitude, latitude, zoom, ..self }
    }

    /// Camera after a renderer change; padding is kept unless the change sets it
    pub fn adopt(self, change: ViewportChange) -> Self {
        Self {
            longitude: change.longitude,
            latitude: change.latitude,
            zoom: change.zoom,
            pitch: change.pitch,
            bearing: change.bearing,
            padding: change.padding.unwrap_or(self.padding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_event_without_padding() {
        let change: ViewportChange = serde_json::from_str(
            r#"{"longitude": 26.7, "latitude": 58.3, "zoom": 10, "pitch": 0, "bearing": 0}"#,
        )
        .unwrap();
        assert_eq!(change.padding, None);

        let base = Viewport { padding: 64.0, ..Viewport::default() };
        let adopted = base.adopt(change);
        assert_eq!(adopted.longitude, 26.7);
        assert_eq!(adopted.zoom, 10.0);
        assert_eq!(adopted.padding, 64.0);
    }

    #[test]
    fn test_renderer_event_with_padding() {
        let change: ViewportChange = serde_json::from_str(
            r#"{"longitude": 24.7, "latitude": 59.4, "zoom": 11, "pitch": 30, "bearing": 10, "padding": 12}"#,
        )
        .unwrap();
        assert_eq!(Viewport::default().adopt(change).padding, 12.0);
    }
}
