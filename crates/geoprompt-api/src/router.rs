use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Chat
        .route("/api/v1/chat", post(handlers::handle_chat))

        // Layers
        .route("/api/v1/layers", get(handlers::list_layers).delete(handlers::clear_layers))
        .route("/api/v1/layers/{id}", delete(handlers::delete_layer))
        .route("/api/v1/layers/{id}/toggle", post(handlers::toggle_layer))

        // Renderer
        .route("/api/v1/render", get(handlers::get_render))
        .route("/api/v1/viewport", get(handlers::get_viewport).put(handlers::put_viewport))

        // Export
        .route("/api/v1/export", post(handlers::handle_export))

        // Catalog and datasets
        .route("/api/v1/catalog", get(handlers::list_catalog))
        .route("/api/v1/datasets/{name}/schema", get(handlers::get_schema))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
