use std::env;
use std::path::PathBuf;

use geoprompt_core::config::LayeredConfig;
use geoprompt_core::Result;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// TOML file layered under the `GEOPROMPT_*` variables
    pub config_path: Option<PathBuf>,
    /// Serve the built-in sample data instead of the dataset files
    pub demo: bool,
}

fn flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("GEOPROMPT_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3001);

        let cors_origin =
            env::var("GEOPROMPT_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let config_path = env::var("GEOPROMPT_CONFIG").ok().map(PathBuf::from);

        let demo = env::var("GEOPROMPT_DEMO").map(|v| flag(&v)).unwrap_or(false);

        Self { port, cors_origin, config_path, demo }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Defaults, then the config file if one is set, then the environment
    pub fn load_layered(&self) -> Result<LayeredConfig> {
        let mut config = LayeredConfig::with_defaults();
        if let Some(path) = &self.config_path {
            config = config.load_from_file(path)?;
        }
        Ok(config.load_from_env())
    }
}
