use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use geoprompt_core::models::{Viewport, ViewportChange};

use crate::dto::RenderResponse;
use crate::state::AppState;

pub async fn get_render(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.lock().await;

    let body = RenderResponse {
        layers: session.render_layers(),
        viewport: *session.viewport(),
        location: session.location_label(),
    };
    Json(body).into_response()
}

pub async fn get_viewport(State(state): State<Arc<AppState>>) -> Json<Viewport> {
    Json(*state.session.lock().await.viewport())
}

/// Adopt a camera change made in the renderer
pub async fn put_viewport(
    State(state): State<Arc<AppState>>,
    Json(change): Json<ViewportChange>,
) -> Json<Viewport> {
    let mut session = state.session.lock().await;
    session.adopt_viewport(change);
    Json(*session.viewport())
}
