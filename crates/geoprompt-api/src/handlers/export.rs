use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use geoprompt_map::export;

use crate::dto::ExportRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn handle_export(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let session = state.session.lock().await;
    let layers = session.select(request.layer_ids.as_deref());

    if layers.is_empty() {
        return Err(ApiError::not_found("No layers to export"));
    }

    let document = export(&layers, request.format, Utc::now().date_naive())?;
    tracing::info!(filename = %document.filename, bytes = document.bytes.len(), "Export ready");

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
