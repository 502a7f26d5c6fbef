//! Ask command implementation

use super::{print_reply, write_export, EngineChoice};
use crate::cli::AskArgs;
use crate::output::OutputWriter;
use crate::output_types::AskOutput;
use crate::progress::create_spinner;
use anyhow::{Context, Result};
use geoprompt_core::config::LayeredConfig;
use geoprompt_map::{build_controller, ExportFormat, ReplyOutcome};

pub async fn execute(
    args: AskArgs,
    config: &LayeredConfig,
    choice: EngineChoice,
    output: &OutputWriter,
) -> Result<()> {
    let format = args
        .export
        .as_deref()
        .map(str::parse::<ExportFormat>)
        .transpose()
        .context("Invalid --export format")?;

    let mut controller = build_controller(config, choice).context("Failed to set up the map controller")?;

    let question = args.question();
    let spinner = create_spinner("Thinking...", output.is_json());
    let reply = controller.submit(&question).await;
    spinner.finish_and_clear();
    let reply = reply.context("Dataset engine is not available")?;

    let export = match (format, &reply.outcome) {
        (Some(format), ReplyOutcome::LayerAdded { layer_id, .. }) => {
            Some(write_export(&controller, format, Some(&[*layer_id]), &args.out)?)
        }
        (Some(_), _) => {
            output.warning("Nothing to export, no layer was added");
            None
        }
        (None, _) => None,
    };

    if output.is_json() {
        return output.result(AskOutput { reply, export });
    }

    print_reply(output, &reply);
    if let Some(written) = export {
        output.success(format!("Exported {} bytes to {}", written.bytes, written.path.display()));
    }

    Ok(())
}
