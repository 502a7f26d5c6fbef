use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use geoprompt_map::{LayerId, LayerSummary};

use crate::dto::{DeleteResponse, ToggleResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_layers(State(state): State<Arc<AppState>>) -> Json<Vec<LayerSummary>> {
    Json(state.session.lock().await.summaries())
}

pub async fn toggle_layer(
    State(state): State<Arc<AppState>>,
    Path(layer_id): Path<u64>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let id = LayerId(layer_id);
    let mut session = state.session.lock().await;

    if !session.toggle_visible(id) {
        return Err(ApiError::not_found("Layer not found"));
    }
    let visible = session.layer(id).is_some_and(|layer| layer.visible);

    tracing::info!(layer_id = %id, visible, "Toggled layer");
    Ok(Json(ToggleResponse { id, visible }))
}

pub async fn delete_layer(
    State(state): State<Arc<AppState>>,
    Path(layer_id): Path<u64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = LayerId(layer_id);
    if !state.session.lock().await.remove(id) {
        return Err(ApiError::not_found("Layer not found"));
    }

    tracing::info!(layer_id = %id, "Removed layer");
    Ok(Json(DeleteResponse::removed("layer", 1)))
}

pub async fn clear_layers(State(state): State<Arc<AppState>>) -> Json<DeleteResponse> {
    let mut session = state.session.lock().await;
    let count = session.layers().len();
    session.clear_all();

    tracing::info!(removed = count, "Cleared layers");
    Json(DeleteResponse::removed("layers", count))
}
