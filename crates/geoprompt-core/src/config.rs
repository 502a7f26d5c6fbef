use crate::error::{GeopromptError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Which place resolver backs "center map on X"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderKind {
    /// Built-in table of known cities
    #[default]
    Static,
    /// OpenStreetMap Nominatim search
    Nominatim,
}

/// Reasoning service selection parsed from `provider:model`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    pub provider: String,
    pub model: String,
}

/// Layered configuration for GeoPrompt
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Directory holding buildings.parquet, roads.parquet and landuse.parquet
    pub data_dir: ConfigValue<PathBuf>,
    /// `none` or `ollama:<model>`
    pub generator: ConfigValue<String>,
    pub generator_url: ConfigValue<String>,
    pub geocoder: ConfigValue<GeocoderKind>,
    pub result_limit: ConfigValue<u32>,
    pub default_radius_km: ConfigValue<f64>,
    pub viewport_width: ConfigValue<u32>,
    pub viewport_height: ConfigValue<u32>,
    pub http_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            data_dir: ConfigValue::new(PathBuf::from("data"), ConfigSource::Default),
            generator: ConfigValue::new("none".to_string(), ConfigSource::Default),
            generator_url: ConfigValue::new(
                "http://localhost:11434".to_string(),
                ConfigSource::Default,
            ),
            geocoder: ConfigValue::new(GeocoderKind::Static, ConfigSource::Default),
            result_limit: ConfigValue::new(1000, ConfigSource::Default),
            default_radius_km: ConfigValue::new(10.0, ConfigSource::Default),
            viewport_width: ConfigValue::new(1280, ConfigSource::Default),
            viewport_height: ConfigValue::new(800, ConfigSource::Default),
            http_timeout_secs: ConfigValue::new(30, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeopromptError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeopromptError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        if let Some(generator) = file_config.generator {
            parse_generator_spec(&generator)?;
            self.generator.update(generator, ConfigSource::File);
        }

        if let Some(generator_url) = file_config.generator_url {
            self.generator_url.update(generator_url, ConfigSource::File);
        }

        if let Some(geocoder) = file_config.geocoder {
            self.geocoder.update(geocoder, ConfigSource::File);
        }

        if let Some(limit) = file_config.result_limit {
            self.result_limit.update(validate_limit(limit)?, ConfigSource::File);
        }

        if let Some(radius) = file_config.default_radius_km {
            self.default_radius_km.update(validate_radius(radius)?, ConfigSource::File);
        }

        if let Some(viewport) = file_config.viewport {
            if let Some(width) = viewport.width {
                self.viewport_width.update(width, ConfigSource::File);
            }
            if let Some(height) = viewport.height {
                self.viewport_height.update(height, ConfigSource::File);
            }
        }

        if let Some(timeout) = file_config.http_timeout_secs {
            self.http_timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOPROMPT_DATA_DIR
        if let Ok(dir) = env::var("GEOPROMPT_DATA_DIR") {
            self.data_dir.update(PathBuf::from(dir), ConfigSource::Environment);
        }

        // GEOPROMPT_GENERATOR
        if let Ok(generator) = env::var("GEOPROMPT_GENERATOR") {
            match parse_generator_spec(&generator) {
                Ok(_) => self.generator.update(generator, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPROMPT_GENERATOR value '{}': expected none or ollama:<model>",
                    generator
                ),
            }
        }

        // GEOPROMPT_GENERATOR_URL
        if let Ok(url) = env::var("GEOPROMPT_GENERATOR_URL") {
            self.generator_url.update(url, ConfigSource::Environment);
        }

        // GEOPROMPT_GEOCODER
        if let Ok(geocoder_str) = env::var("GEOPROMPT_GEOCODER") {
            match parse_geocoder(&geocoder_str) {
                Ok(geocoder) => self.geocoder.update(geocoder, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPROMPT_GEOCODER value '{}': expected static or nominatim",
                    geocoder_str
                ),
            }
        }

        // GEOPROMPT_RESULT_LIMIT
        if let Ok(limit_str) = env::var("GEOPROMPT_RESULT_LIMIT") {
            match limit_str.parse::<u32>() {
                Ok(limit) if limit > 0 => {
                    self.result_limit.update(limit, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid GEOPROMPT_RESULT_LIMIT value '{}': expected positive integer",
                    limit_str
                ),
            }
        }

        // GEOPROMPT_RADIUS_KM
        if let Ok(radius_str) = env::var("GEOPROMPT_RADIUS_KM") {
            match radius_str.parse::<f64>() {
                Ok(radius) if radius.is_finite() && radius > 0.0 => {
                    self.default_radius_km.update(radius, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid GEOPROMPT_RADIUS_KM value '{}': expected positive number",
                    radius_str
                ),
            }
        }

        // GEOPROMPT_HTTP_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("GEOPROMPT_HTTP_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => self.http_timeout_secs.update(timeout, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOPROMPT_HTTP_TIMEOUT_SECS value '{}': expected integer seconds",
                    timeout_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(data_dir, ConfigSource::Cli);
        }

        if let Some(generator) = overrides.generator {
            self.generator.update(generator, ConfigSource::Cli);
        }

        if let Some(generator_url) = overrides.generator_url {
            self.generator_url.update(generator_url, ConfigSource::Cli);
        }

        if let Some(geocoder) = overrides.geocoder {
            self.geocoder.update(geocoder, ConfigSource::Cli);
        }

        if let Some(limit) = overrides.result_limit {
            self.result_limit.update(limit, ConfigSource::Cli);
        }
    }

    /// Parsed generator selection; `None` means no reasoning service
    pub fn generator_spec(&self) -> Result<Option<GeneratorSpec>> {
        parse_generator_spec(&self.generator.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.display().to_string(), self.data_dir.source),
        );

        map.insert("generator".to_string(), (self.generator.value.clone(), self.generator.source));

        map.insert(
            "generator_url".to_string(),
            (self.generator_url.value.clone(), self.generator_url.source),
        );

        map.insert(
            "geocoder".to_string(),
            (format!("{:?}", self.geocoder.value), self.geocoder.source),
        );

        map.insert(
            "result_limit".to_string(),
            (self.result_limit.value.to_string(), self.result_limit.source),
        );

        map.insert(
            "default_radius_km".to_string(),
            (self.default_radius_km.value.to_string(), self.default_radius_km.source),
        );

        map.insert(
            "viewport".to_string(),
            (
                format!("{}x{}", self.viewport_width.value, self.viewport_height.value),
                self.viewport_width.source,
            ),
        );

        map.insert(
            "http_timeout_secs".to_string(),
            (self.http_timeout_secs.value.to_string(), self.http_timeout_secs.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    generator: Option<String>,
    generator_url: Option<String>,
    geocoder: Option<GeocoderKind>,
    result_limit: Option<u32>,
    default_radius_km: Option<f64>,
    viewport: Option<ViewportSize>,
    http_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct ViewportSize {
    width: Option<u32>,
    height: Option<u32>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub generator: Option<String>,
    pub generator_url: Option<String>,
    pub geocoder: Option<GeocoderKind>,
    pub result_limit: Option<u32>,
}

/// Parse a generator selection: `none`, or `provider:model`
pub fn parse_generator_spec(s: &str) -> Result<Option<GeneratorSpec>> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    match trimmed.split_once(':') {
        Some((provider, model)) if provider.eq_ignore_ascii_case("ollama") && !model.is_empty() => {
            Ok(Some(GeneratorSpec {
                provider: provider.to_lowercase(),
                model: model.to_string(),
            }))
        }
        _ => Err(GeopromptError::ConfigInvalid {
            key: "generator".to_string(),
            reason: format!("Invalid generator: {}. Use none or ollama:<model>", s),
        }),
    }
}

/// Parse geocoder kind from string
pub fn parse_geocoder(s: &str) -> Result<GeocoderKind> {
    match s.to_lowercase().as_str() {
        "static" | "builtin" => Ok(GeocoderKind::Static),
        "nominatim" | "osm" => Ok(GeocoderKind::Nominatim),
        _ => Err(GeopromptError::ConfigInvalid {
            key: "geocoder".to_string(),
            reason: format!("Invalid geocoder: {}. Use static or nominatim", s),
        }),
    }
}

fn validate_limit(limit: u32) -> Result<u32> {
    if limit == 0 {
        return Err(GeopromptError::ConfigInvalid {
            key: "result_limit".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(limit)
}

fn validate_radius(radius: f64) -> Result<f64> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(GeopromptError::ConfigInvalid {
            key: "default_radius_km".to_string(),
            reason: format!("must be a positive number, got {}", radius),
        });
    }
    Ok(radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.data_dir.value, PathBuf::from("data"));
        assert_eq!(config.generator.value, "none");
        assert_eq!(config.geocoder.value, GeocoderKind::Static);
        assert_eq!(config.result_limit.value, 1000);
        assert_eq!(config.result_limit.source, ConfigSource::Default);
        assert!(config.generator_spec().unwrap().is_none());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
data_dir = "/srv/estonia"
generator = "ollama:llama3.1"
geocoder = "nominatim"
result_limit = 250

[viewport]
width = 1920
height = 1080
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.data_dir.value, PathBuf::from("/srv/estonia"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.geocoder.value, GeocoderKind::Nominatim);
        assert_eq!(config.result_limit.value, 250);
        assert_eq!(config.viewport_width.value, 1920);
        assert_eq!(config.viewport_height.value, 1080);

        let spec = config.generator_spec().unwrap().unwrap();
        assert_eq!(spec.provider, "ollama");
        assert_eq!(spec.model, "llama3.1");
    }

    #[test]
    fn test_file_rejects_zero_limit() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "result_limit = 0").unwrap();
        assert!(LayeredConfig::with_defaults().load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            data_dir: Some(PathBuf::from("fixtures")),
            generator: Some("ollama:qwen2.5".to_string()),
            ..Default::default()
        };

        config.update_from_cli(overrides);

        assert_eq!(config.data_dir.value, PathBuf::from("fixtures"));
        assert_eq!(config.data_dir.source, ConfigSource::Cli);
        assert_eq!(config.generator.source, ConfigSource::Cli);
        // These should still be defaults
        assert_eq!(config.geocoder.source, ConfigSource::Default);
        assert_eq!(config.result_limit.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_generator_spec() {
        assert!(parse_generator_spec("none").unwrap().is_none());
        assert!(parse_generator_spec("").unwrap().is_none());
        assert_eq!(parse_generator_spec("OLLAMA:mistral").unwrap().unwrap().model, "mistral");
        assert!(parse_generator_spec("openai:gpt").is_err());
        assert!(parse_generator_spec("ollama:").is_err());
    }

    #[test]
    fn test_parse_geocoder() {
        assert_eq!(parse_geocoder("static").unwrap(), GeocoderKind::Static);
        assert_eq!(parse_geocoder("Nominatim").unwrap(), GeocoderKind::Nominatim);
        assert!(parse_geocoder("google").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("data_dir"));
        assert!(map.contains_key("generator"));
        assert!(map.contains_key("geocoder"));

        let (viewport, source) = &map["viewport"];
        assert_eq!(viewport, "1280x800");
        assert_eq!(*source, ConfigSource::Default);
    }
}
