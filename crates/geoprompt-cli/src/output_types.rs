use geoprompt_map::{ChatReply, LayerSummary};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Output for ask command
#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub reply: ChatReply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportOutput>,
}

/// A file written by `--export` or `:export`
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub path: PathBuf,
    pub bytes: usize,
    pub layers: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct LayerRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Features")]
    pub feature_count: usize,
    #[tabled(rename = "Visible")]
    pub visible: bool,
    #[tabled(rename = "Color")]
    pub color: String,
}

impl From<LayerSummary> for LayerRow {
    fn from(summary: LayerSummary) -> Self {
        let [r, g, b, _] = summary.fill_color;
        Self {
            id: summary.id.0,
            name: summary.name,
            feature_count: summary.feature_count,
            visible: summary.visible,
            color: format!("#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct CatalogRow {
    #[tabled(rename = "Keyword")]
    pub keyword: String,
    #[tabled(rename = "Dataset")]
    pub dataset: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(skip)]
    pub query: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ColumnRow {
    #[tabled(rename = "Column")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub data_type: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
