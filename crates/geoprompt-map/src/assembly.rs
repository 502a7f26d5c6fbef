//! Building a controller from configuration.

use std::sync::Arc;
use std::time::Duration;

use geoprompt_core::config::{GeocoderKind, LayeredConfig};
use geoprompt_core::{GeopromptError, Result};
use geoprompt_geo::{NominatimResolver, PlaceResolver, StaticPlaceResolver};
use geoprompt_intent::{IntentResolver, ResolverSettings};
use geoprompt_llm::{Generator, OllamaGenerator};
use geoprompt_store::{MemoryEngine, QueryExecutor, SharedEngine};

use crate::controller::MapController;
use crate::session::Session;

/// Which engine answers queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineChoice {
    /// The dataset files in the configured data directory
    #[default]
    Datasets,
    /// Built-in sample features, no files needed
    Sample,
}

fn http_timeout(config: &LayeredConfig) -> Duration {
    Duration::from_secs(config.http_timeout_secs.value)
}

/// Shared engine for `choice`. Setup runs on first use.
pub fn build_engine(config: &LayeredConfig, choice: EngineChoice) -> Result<Arc<SharedEngine>> {
    if choice == EngineChoice::Sample {
        tracing::info!("using built-in sample data");
        return Ok(Arc::new(SharedEngine::preloaded(Arc::new(MemoryEngine::with_sample_data()))));
    }

    dataset_engine(config)
}

#[cfg(feature = "duckdb")]
fn dataset_engine(config: &LayeredConfig) -> Result<Arc<SharedEngine>> {
    let staging = std::env::temp_dir().join(format!("geoprompt-{}", std::process::id()));
    let engine = geoprompt_store::DuckDbEngine::open(staging)?;
    tracing::info!(data_dir = %config.data_dir.value.display(), "using DuckDB engine");
    Ok(Arc::new(SharedEngine::new(Arc::new(engine), config.data_dir.value.clone())))
}

#[cfg(not(feature = "duckdb"))]
fn dataset_engine(config: &LayeredConfig) -> Result<Arc<SharedEngine>> {
    tracing::error!(data_dir = %config.data_dir.value.display(), "no dataset engine in this build");
    Err(GeopromptError::EngineSetup {
        reason: "built without the duckdb feature; rebuild with --features duckdb, or pass --demo for built-in sample data"
            .to_string(),
    })
}

/// Reasoning service named by the `generator` setting, if any
pub fn build_generator(config: &LayeredConfig) -> Result<Option<Arc<dyn Generator>>> {
    let Some(spec) = config.generator_spec()? else {
        return Ok(None);
    };

    match spec.provider.as_str() {
        "ollama" => {
            let generator =
                OllamaGenerator::new(config.generator_url.value.clone(), spec.model, http_timeout(config))?;
            Ok(Some(Arc::new(generator)))
        }
        other => Err(GeopromptError::ConfigInvalid {
            key: "generator".to_string(),
            reason: format!("Unsupported provider: {}", other),
        }),
    }
}

/// Place resolver named by the `geocoder` setting
pub fn build_place_resolver(config: &LayeredConfig) -> Result<Arc<dyn PlaceResolver>> {
    match config.geocoder.value {
        GeocoderKind::Static => Ok(Arc::new(StaticPlaceResolver)),
        GeocoderKind::Nominatim => Ok(Arc::new(NominatimResolver::public(http_timeout(config))?)),
    }
}

/// Controller wired from configuration
pub fn build_controller(config: &LayeredConfig, choice: EngineChoice) -> Result<MapController> {
    let engine = build_engine(config, choice)?;
    let generator = build_generator(config)?;
    let settings = ResolverSettings {
        result_limit: config.result_limit.value,
        default_radius_km: config.default_radius_km.value,
    };

    tracing::info!(
        generator = generator.as_ref().map(|g| g.model_name()).unwrap_or("none"),
        geocoder = ?config.geocoder.value,
        result_limit = settings.result_limit,
        "controller ready"
    );

    Ok(MapController::new(
        IntentResolver::new(generator, settings),
        QueryExecutor::new(engine),
        build_place_resolver(config)?,
        Session::new((config.viewport_width.value, config.viewport_height.value)),
    ))
}
