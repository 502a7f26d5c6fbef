//! Command implementations

mod ask;
mod catalog;
mod config;
mod repl;
mod schema;

use crate::cli::{Cli, Commands};
use crate::config_loader;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use geoprompt_map::{ChatReply, ExportFormat, LayerId, MapController, ReplyOutcome};
use std::fs;
use std::path::Path;

pub use geoprompt_map::EngineChoice;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = config_loader::load_for(&cli)?;
    let choice = if cli.demo { EngineChoice::Sample } else { EngineChoice::Datasets };

    match cli.command {
        Commands::Ask(args) => ask::execute(args, &config, choice, &output).await,
        Commands::Repl => repl::execute(&config, choice, &output).await,
        Commands::Catalog => catalog::execute(&output),
        Commands::Schema(args) => schema::execute(args, &config, choice, &output).await,
        Commands::Config => config::execute(&config, choice, &output),
    }
}

/// Human rendering of a chat reply
fn print_reply(output: &OutputWriter, reply: &ChatReply) {
    match &reply.outcome {
        ReplyOutcome::Failed { .. } => output.warning(&reply.message),
        ReplyOutcome::NoData | ReplyOutcome::Explained => output.info(&reply.message),
        ReplyOutcome::Centered { .. } | ReplyOutcome::LayerAdded { .. } => output.success(&reply.message),
    }

    if let Some(notice) = &reply.notice {
        output.warning(notice);
    }
    if let Some(query) = &reply.query {
        output.kv("SQL", query);
    }
}

/// Write the selected layers into `out_dir` under the dated export filename
fn write_export(
    controller: &MapController,
    format: ExportFormat,
    ids: Option<&[LayerId]>,
    out_dir: &Path,
) -> Result<ExportOutput> {
    let layers = controller.session().select(ids).len();
    if layers == 0 {
        bail!("No layers to export");
    }

    let document = controller.export(format, ids, Utc::now().date_naive())?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;
    let path = out_dir.join(&document.filename);
    fs::write(&path, &document.bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = document.bytes.len(), layers, "Export written");

    Ok(ExportOutput { path, bytes: document.bytes.len(), layers })
}
