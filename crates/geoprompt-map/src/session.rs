//! Layer and viewport state of one map session.

use chrono::{DateTime, Utc};
use geoprompt_core::models::{BoundingBox, Feature, FeatureCollection, Viewport, ViewportChange};
use geoprompt_geo::fit_bounds;
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::palette::{fill_color, line_color, Rgba};

/// Zoom used when centering on a named place
pub const PLACE_ZOOM: f64 = 12.0;

/// Default pixel size of the map surface
pub const DEFAULT_VIEWPORT_SIZE: (u32, u32) = (1280, 800);

/// What the renderer draws for one visible layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderLayer<'a> {
    pub id: LayerId,
    pub geometry_data: &'a FeatureCollection,
    pub fill_color: Rgba,
    pub line_color: Rgba,
    pub pickable: bool,
}

/// Layer overview without feature data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub id: LayerId,
    pub name: String,
    pub feature_count: usize,
    pub visible: bool,
    pub timestamp: DateTime<Utc>,
    pub fill_color: Rgba,
    pub line_color: Rgba,
}

/// Ordered layers plus camera state.
///
/// Insertion order is recency order. Every mutation is synchronous and only
/// touches this struct; render layers are derived on demand.
#[derive(Debug, Clone)]
pub struct Session {
    layers: Vec<Layer>,
    viewport: Viewport,
    location_label: Option<String>,
    viewport_size: (u32, u32),
    last_id: Option<LayerId>,
    /// Layers ever added, removals included
    added: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_SIZE)
    }
}

impl Session {
    /// Empty session for a map surface of `(width, height)` pixels
    pub fn new(viewport_size: (u32, u32)) -> Self {
        Self {
            layers: Vec::new(),
            viewport: Viewport::default(),
            location_label: None,
            viewport_size,
            last_id: None,
            added: 0,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn location_label(&self) -> Option<&str> {
        self.location_label.as_deref()
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport_size = (width, height);
    }

    /// Name for a result without a location; never repeats within a session
    pub fn auto_label(&self) -> String {
        format!("Layer {}", self.added + 1)
    }

    /// Append a visible layer holding `features`. Empty results add nothing.
    pub fn apply_result(&mut self, features: Vec<Feature>, label: impl Into<String>) -> Option<&Layer> {
        self.apply_result_at(features, label, Utc::now())
    }

    /// [`Session::apply_result`] with an explicit clock
    pub fn apply_result_at(
        &mut self,
        features: Vec<Feature>,
        label: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Option<&Layer> {
        if features.is_empty() {
            return None;
        }

        let id = LayerId::after(self.last_id, now);
        self.last_id = Some(id);
        self.added += 1;

        let layer = Layer::new(id, label, FeatureCollection::new(features), now);
        tracing::debug!(layer_id = %id, name = %layer.name, features = layer.feature_count(), "layer added");
        self.layers.push(layer);
        self.layers.last()
    }

    /// Fit the camera to `bbox` for the session's pixel size
    pub fn set_viewport_to_bounds(&mut self, bbox: Option<BoundingBox>) {
        let Some(bbox) = bbox else {
            return;
        };

        let (width, height) = self.viewport_size;
        let fitted = fit_bounds(&bbox, f64::from(width), f64::from(height), self.viewport.padding);
        self.viewport = self.viewport.centered(fitted.longitude, fitted.latitude, fitted.zoom);
    }

    /// Move the camera to a place and remember its name
    pub fn center_on(&mut self, lat: f64, lon: f64, label: impl Into<String>) {
        self.viewport = self.viewport.centered(lon, lat, PLACE_ZOOM);
        self.location_label = Some(label.into());
    }

    /// Record the location a result was queried around
    pub fn set_location_label(&mut self, label: impl Into<String>) {
        self.location_label = Some(label.into());
    }

    /// Accept a camera change made in the renderer
    pub fn adopt_viewport(&mut self, change: ViewportChange) {
        self.viewport = self.viewport.adopt(change);
    }

    /// Flip visibility; false when no such layer exists
    pub fn toggle_visible(&mut self, id: LayerId) -> bool {
        match self.layers.iter_mut().find(|layer| layer.id == id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => false,
        }
    }

    /// Remove one layer; false when no such layer exists
    pub fn remove(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.id != id);
        self.layers.len() != before
    }

    /// Remove every layer; false when there were none
    pub fn clear_all(&mut self) -> bool {
        let had_layers = !self.layers.is_empty();
        self.layers.clear();
        had_layers
    }

    /// Layers in session order, restricted to `ids` when given
    pub fn select(&self, ids: Option<&[LayerId]>) -> Vec<&Layer> {
        match ids {
            Some(ids) => self.layers.iter().filter(|layer| ids.contains(&layer.id)).collect(),
            None => self.layers.iter().collect(),
        }
    }

    /// Visible layers in drawing order, colored by their position among all layers
    pub fn render_layers(&self) -> Vec<RenderLayer<'_>> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.visible)
            .map(|(position, layer)| RenderLayer {
                id: layer.id,
                geometry_data: &layer.data,
                fill_color: fill_color(position),
                line_color: line_color(position),
                pickable: true,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<LayerSummary> {
        self.layers
            .iter()
            .enumerate()
            .map(|(position, layer)| LayerSummary {
                id: layer.id,
                name: layer.name.clone(),
                feature_count: layer.feature_count(),
                visible: layer.visible,
                timestamp: layer.timestamp,
                fill_color: fill_color(position),
                line_color: line_color(position),
            })
            .collect()
    }
}
