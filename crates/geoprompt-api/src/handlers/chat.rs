use std::sync::Arc;

use axum::{extract::State, Json};
use geoprompt_map::ChatReply;

use crate::dto::ChatRequest;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::bad_request("Message text is empty"));
    }

    tracing::info!(text = %request.text, "Chat submission");

    let _turn = state.submissions.lock().await;
    let pending = state.pipeline.prepare(&request.text).await.map_err(|e| {
        tracing::error!(error = %e, "Chat submission failed");
        ApiError::from(e)
    })?;

    let reply = pending.apply(&mut *state.session.lock().await);
    Ok(Json(reply))
}
