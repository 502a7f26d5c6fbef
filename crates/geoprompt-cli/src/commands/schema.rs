//! Schema command implementation

use super::EngineChoice;
use crate::cli::SchemaArgs;
use crate::output::OutputWriter;
use crate::output_types::ColumnRow;
use anyhow::{Context, Result};
use geoprompt_core::config::LayeredConfig;
use geoprompt_core::models::DataType;
use geoprompt_map::build_controller;

pub async fn execute(
    args: SchemaArgs,
    config: &LayeredConfig,
    choice: EngineChoice,
    output: &OutputWriter,
) -> Result<()> {
    let data_type: DataType = args.dataset.parse()?;

    let controller = build_controller(config, choice).context("Failed to set up the map controller")?;
    let columns = controller
        .describe_schema(data_type)
        .await
        .with_context(|| format!("Failed to describe {}", data_type.as_str()))?;

    let rows: Vec<ColumnRow> = columns
        .into_iter()
        .map(|column| ColumnRow { name: column.name, data_type: column.data_type })
        .collect();

    output.section(format!("{} ({})", data_type.as_str(), data_type.source_name()));
    output.table(rows)
}
