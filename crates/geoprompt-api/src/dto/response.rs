use geoprompt_core::models::{DataType, Viewport};
use geoprompt_map::{LayerId, RenderLayer};
use geoprompt_store::ColumnInfo;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "geoprompt-api" }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct RenderResponse<'a> {
    pub layers: Vec<RenderLayer<'a>>,
    pub viewport: Viewport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
}

/// Visibility after a toggle
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: LayerId,
    pub visible: bool,
}

/// One canned query
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub keyword: &'static str,
    pub dataset: DataType,
    pub description: &'static str,
    pub query: &'static str,
}

/// Columns of a dataset
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub dataset: DataType,
    pub columns: Vec<ColumnInfo>,
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub removed: usize,
    pub message: String,
}

impl DeleteResponse {
    pub fn removed(entity: &str, removed: usize) -> Self {
        Self {
            success: true,
            removed,
            message: format!("Removed {} {}", removed, entity),
        }
    }
}
