use geoprompt_map::{ExportFormat, LayerId};
use serde::Deserialize;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Export request body; all layers when `layer_ids` is absent
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
    #[serde(default)]
    pub layer_ids: Option<Vec<LayerId>>,
}
