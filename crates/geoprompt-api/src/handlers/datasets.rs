use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use geoprompt_core::models::DataType;

use crate::dto::SchemaResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_schema(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<SchemaResponse>, ApiError> {
    let dataset: DataType = name.parse()?;
    tracing::info!(dataset = %dataset, "Describing dataset");

    let columns = state.pipeline.describe_schema(dataset).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to describe dataset");
        ApiError::from(e)
    })?;

    Ok(Json(SchemaResponse { dataset, columns }))
}
