//! Config command implementation

use super::EngineChoice;
use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use geoprompt_core::config::{ConfigSource, LayeredConfig};

fn source_label(source: ConfigSource) -> &'static str {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "file",
        ConfigSource::Environment => "env",
        ConfigSource::Cli => "cli",
    }
}

pub fn execute(config: &LayeredConfig, choice: EngineChoice, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: source_label(source).to_string(),
        })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    let engine = match choice {
        EngineChoice::Datasets => "datasets",
        EngineChoice::Sample => "sample",
    };
    rows.push(ConfigRow {
        key: "engine".to_string(),
        value: engine.to_string(),
        source: if choice == EngineChoice::Sample { "cli" } else { "default" }.to_string(),
    });

    output.section("Effective configuration");
    output.table(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_labels() {
        assert_eq!(source_label(ConfigSource::Environment), "env");
        assert_eq!(source_label(ConfigSource::Cli), "cli");
    }
}
