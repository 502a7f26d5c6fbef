//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use geoprompt_core::config::{parse_geocoder, CliConfigOverrides, LayeredConfig};
use std::path::Path;

use crate::cli::Cli;

/// Picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "geoprompt.toml";

/// Global flags that override configuration values
pub fn cli_overrides(cli: &Cli) -> Result<CliConfigOverrides> {
    let geocoder = cli
        .geocoder
        .as_deref()
        .map(parse_geocoder)
        .transpose()
        .context("Invalid --geocoder value")?;

    Ok(CliConfigOverrides {
        data_dir: cli.data_dir.clone(),
        generator: cli.generator.clone(),
        generator_url: None,
        geocoder,
        result_limit: None,
    })
}

/// Defaults, then the config file, then the environment, then CLI overrides
pub fn load_config(config_path: Option<&Path>, overrides: CliConfigOverrides) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match config_path {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
        }
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_FILE);
            if implicit.exists() {
                config = config
                    .load_from_file(implicit)
                    .context("Failed to load configuration file")?;
            }
        }
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);

    // Fail early on a malformed generator selection
    config.generator_spec().context("Invalid generator setting")?;

    Ok(config)
}

/// Layered configuration for a parsed command line
pub fn load_for(cli: &Cli) -> Result<LayeredConfig> {
    load_config(cli.config.as_deref(), cli_overrides(cli)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use geoprompt_core::config::{ConfigSource, GeocoderKind};

    #[test]
    fn test_cli_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geoprompt.toml");
        std::fs::write(&path, "data_dir = \"from-file\"\nresult_limit = 50\n").unwrap();

        let cli = Cli::parse_from(["geoprompt", "--data-dir", "from-cli", "config"]);
        let config = load_config(Some(&path), cli_overrides(&cli).unwrap()).unwrap();

        assert_eq!(config.data_dir.value, std::path::PathBuf::from("from-cli"));
        assert_eq!(config.data_dir.source, ConfigSource::Cli);
        assert_eq!(config.result_limit.value, 50);
        assert_eq!(config.result_limit.source, ConfigSource::File);
    }

    #[test]
    fn test_geocoder_override() {
        let cli = Cli::parse_from(["geoprompt", "--geocoder", "nominatim", "catalog"]);
        let overrides = cli_overrides(&cli).unwrap();
        assert_eq!(overrides.geocoder, Some(GeocoderKind::Nominatim));
    }

    #[test]
    fn test_bad_geocoder_is_rejected() {
        let cli = Cli::parse_from(["geoprompt", "--geocoder", "bing", "catalog"]);
        assert!(cli_overrides(&cli).is_err());
    }

    #[test]
    fn test_bad_generator_is_rejected() {
        let cli = Cli::parse_from(["geoprompt", "--generator", "ollama:", "catalog"]);
        assert!(load_config(None, cli_overrides(&cli).unwrap()).is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = load_config(Some(Path::new("/nonexistent/geoprompt.toml")), CliConfigOverrides::default());
        assert!(result.is_err());
    }
}
