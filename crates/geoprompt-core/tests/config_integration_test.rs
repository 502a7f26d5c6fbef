//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use geoprompt_core::config::{
    CliConfigOverrides, ConfigSource, GeocoderKind, LayeredConfig,
};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const ENV_KEYS: [&str; 6] = [
    "GEOPROMPT_DATA_DIR",
    "GEOPROMPT_GENERATOR",
    "GEOPROMPT_GEOCODER",
    "GEOPROMPT_RESULT_LIMIT",
    "GEOPROMPT_RADIUS_KM",
    "GEOPROMPT_HTTP_TIMEOUT_SECS",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_default_configuration() {
    let config = LayeredConfig::with_defaults();

    assert_eq!(config.data_dir.value, PathBuf::from("data"));
    assert_eq!(config.data_dir.source, ConfigSource::Default);
    assert_eq!(config.generator.value, "none");
    assert_eq!(config.generator_url.value, "http://localhost:11434");
    assert_eq!(config.default_radius_km.value, 10.0);
    assert_eq!(config.http_timeout_secs.value, 30);
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
result_limit = 500
# Only override the limit, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.result_limit.value, 500);
    assert_eq!(config.result_limit.source, ConfigSource::File);
    assert_eq!(config.data_dir.source, ConfigSource::Default);
    assert_eq!(config.generator.source, ConfigSource::Default);
}

#[test]
fn test_invalid_generator_in_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"generator = "openai:gpt-4""#).unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/geoprompt.toml");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();

    env::set_var("GEOPROMPT_DATA_DIR", "/env/data");
    env::set_var("GEOPROMPT_GENERATOR", "ollama:env-model");
    env::set_var("GEOPROMPT_GEOCODER", "nominatim");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
data_dir = "/file/data"
generator = "ollama:file-model"
geocoder = "static"
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.data_dir.value, PathBuf::from("/env/data"));
    assert_eq!(config.data_dir.source, ConfigSource::Environment);
    assert_eq!(config.generator.value, "ollama:env-model");
    assert_eq!(config.geocoder.value, GeocoderKind::Nominatim);
    assert_eq!(config.geocoder.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();

    env::set_var("GEOPROMPT_RESULT_LIMIT", "zero");
    env::set_var("GEOPROMPT_RADIUS_KM", "-3");
    env::set_var("GEOPROMPT_GENERATOR", "gpt");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.result_limit.value, 1000);
    assert_eq!(config.result_limit.source, ConfigSource::Default);
    assert_eq!(config.default_radius_km.value, 10.0);
    assert_eq!(config.generator.value, "none");

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_environment() {
    clear_env();

    env::set_var("GEOPROMPT_DATA_DIR", "/env/data");
    env::set_var("GEOPROMPT_RESULT_LIMIT", "50");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_dir: Some(PathBuf::from("/cli/data")),
        ..Default::default()
    });

    assert_eq!(config.data_dir.value, PathBuf::from("/cli/data"));
    assert_eq!(config.data_dir.source, ConfigSource::Cli);
    // Environment still wins where the CLI was silent
    assert_eq!(config.result_limit.value, 50);
    assert_eq!(config.result_limit.source, ConfigSource::Environment);

    clear_env();
}
