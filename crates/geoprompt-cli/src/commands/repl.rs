//! Interactive session: free text goes to the controller, `:` lines manage layers

use super::{print_reply, write_export, EngineChoice};
use crate::output::OutputWriter;
use crate::output_types::LayerRow;
use crate::progress::create_spinner;
use anyhow::{Context, Result};
use dialoguer::Input;
use geoprompt_core::config::LayeredConfig;
use geoprompt_map::{build_controller, ExportFormat, LayerId, MapController};
use std::path::Path;

const HELP: &str = "\
:layers                 list layers
:toggle ID              show or hide a layer
:remove ID              delete a layer
:clear                  delete all layers
:export FORMAT [IDS]    write geojson or csv to the current directory
:quit                   leave
Anything else is sent as a question.";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    Empty,
    Ask(String),
    Layers,
    Toggle(LayerId),
    Remove(LayerId),
    Clear,
    Export { format: ExportFormat, ids: Option<Vec<LayerId>> },
    Help,
    Quit,
}

fn parse_id(arg: Option<&str>, command: &str) -> Result<LayerId, String> {
    let arg = arg.ok_or_else(|| format!("Usage: {} ID", command))?;
    arg.parse().map_err(|_| format!("Not a layer id: {}", arg))
}

fn parse_line(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Ask(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();

    match name.as_str() {
        "layers" | "ls" => Ok(ReplCommand::Layers),
        "toggle" => parse_id(parts.next(), ":toggle").map(ReplCommand::Toggle),
        "remove" | "rm" => parse_id(parts.next(), ":remove").map(ReplCommand::Remove),
        "clear" => Ok(ReplCommand::Clear),
        "export" => {
            let format = parts
                .next()
                .ok_or_else(|| "Usage: :export FORMAT [IDS]".to_string())?
                .parse::<ExportFormat>()
                .map_err(|e| e.to_string())?;

            let ids = parts
                .flat_map(|part| part.split(','))
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<LayerId>().map_err(|_| format!("Not a layer id: {}", part)))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ReplCommand::Export {
                format,
                ids: if ids.is_empty() { None } else { Some(ids) },
            })
        }
        "help" | "h" | "?" => Ok(ReplCommand::Help),
        "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
        other => Err(format!("Unknown command :{}. Try :help", other)),
    }
}

fn show_layers(controller: &MapController, output: &OutputWriter) -> Result<()> {
    let rows: Vec<LayerRow> = controller.session().summaries().into_iter().map(LayerRow::from).collect();
    output.table(rows)?;
    if let Some(label) = controller.session().location_label() {
        output.kv("Location", label);
    }
    Ok(())
}

pub async fn execute(config: &LayeredConfig, choice: EngineChoice, output: &OutputWriter) -> Result<()> {
    let mut controller = build_controller(config, choice).context("Failed to set up the map controller")?;

    output.info("Ask a question, or :help for commands");

    loop {
        let line: String = match Input::<String>::new().with_prompt("geoprompt").allow_empty(true).interact_text() {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "Input closed");
                break;
            }
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                output.error(message);
                continue;
            }
        };

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Ask(text) => {
                let spinner = create_spinner("Thinking...", output.is_json());
                let reply = controller.submit(&text).await;
                spinner.finish_and_clear();
                let reply = reply.context("Dataset engine is not available")?;

                if output.is_json() {
                    output.result(&reply)?;
                } else {
                    print_reply(output, &reply);
                }
            }
            ReplCommand::Layers => show_layers(&controller, output)?,
            ReplCommand::Toggle(id) => {
                if controller.session_mut().toggle_visible(id) {
                    let visible = controller.session().layer(id).is_some_and(|layer| layer.visible);
                    output.success(format!("Layer {} is now {}", id, if visible { "visible" } else { "hidden" }));
                } else {
                    output.error(format!("Layer {} not found", id));
                }
            }
            ReplCommand::Remove(id) => {
                if controller.session_mut().remove(id) {
                    output.success(format!("Removed layer {}", id));
                } else {
                    output.error(format!("Layer {} not found", id));
                }
            }
            ReplCommand::Clear => {
                if controller.session_mut().clear_all() {
                    output.success("Cleared all layers");
                } else {
                    output.info("No layers to clear");
                }
            }
            ReplCommand::Export { format, ids } => {
                match write_export(&controller, format, ids.as_deref(), Path::new(".")) {
                    Ok(written) => output.success(format!(
                        "Exported {} layer(s) to {}",
                        written.layers,
                        written.path.display()
                    )),
                    Err(e) => output.error(e),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_line("  show roads near Tartu ").unwrap(),
            ReplCommand::Ask("show roads near Tartu".to_string())
        );
        assert_eq!(parse_line("   ").unwrap(), ReplCommand::Empty);
    }

    #[test]
    fn test_layer_commands() {
        assert_eq!(parse_line(":layers").unwrap(), ReplCommand::Layers);
        assert_eq!(parse_line(":toggle 42").unwrap(), ReplCommand::Toggle(LayerId(42)));
        assert_eq!(parse_line(":remove 7").unwrap(), ReplCommand::Remove(LayerId(7)));
        assert_eq!(parse_line(":CLEAR").unwrap(), ReplCommand::Clear);
        assert_eq!(parse_line(":q").unwrap(), ReplCommand::Quit);
    }

    #[test]
    fn test_export_with_ids() {
        assert_eq!(
            parse_line(":export csv 1,2 3").unwrap(),
            ReplCommand::Export {
                format: ExportFormat::Csv,
                ids: Some(vec![LayerId(1), LayerId(2), LayerId(3)]),
            }
        );
        assert_eq!(
            parse_line(":export geojson").unwrap(),
            ReplCommand::Export { format: ExportFormat::GeoJson, ids: None }
        );
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_line(":toggle").unwrap_err().contains("Usage"));
        assert!(parse_line(":remove abc").unwrap_err().contains("Not a layer id"));
        assert!(parse_line(":export pdf").is_err());
        assert!(parse_line(":launch").unwrap_err().contains("Unknown command"));
    }
}
