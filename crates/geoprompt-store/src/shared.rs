//! Lazily initialized, shared engine handle.

use std::path::PathBuf;
use std::sync::Arc;

use geoprompt_core::models::DataType;
use geoprompt_core::{GeopromptError, Result};
use tokio::sync::OnceCell;

use crate::ports::SqlEngine;

/// Leading bytes of every Parquet file
pub const PARQUET_MAGIC: &[u8; 4] = b"PAR1";

/// Extension providing ST_* functions
pub const SPATIAL_EXTENSION: &str = "spatial";

/// Where dataset files come from during setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLocation {
    /// `<dir>/<dataset>.parquet` for every dataset
    Directory(PathBuf),
    /// The engine already holds its datasets
    Preloaded,
}

/// Check the Parquet magic number
pub fn validate_parquet(name: &str, bytes: &[u8]) -> Result<()> {
    if bytes.len() >= PARQUET_MAGIC.len() && &bytes[..PARQUET_MAGIC.len()] == PARQUET_MAGIC {
        Ok(())
    } else {
        Err(GeopromptError::InvalidDatasetFile {
            name: name.to_string(),
            reason: "missing Parquet magic bytes PAR1".to_string(),
        })
    }
}

/// Engine handle with one-time setup.
///
/// The first [`SharedEngine::get`] loads the spatial extension and registers
/// every dataset; concurrent callers wait on that single setup. A failed setup
/// is remembered and returned to every later caller.
pub struct SharedEngine {
    engine: Arc<dyn SqlEngine>,
    datasets: DatasetLocation,
    ready: OnceCell<std::result::Result<(), String>>,
}

impl SharedEngine {
    /// Engine whose datasets are read from `data_dir`
    pub fn new(engine: Arc<dyn SqlEngine>, data_dir: impl Into<PathBuf>) -> Self {
        Self::with_location(engine, DatasetLocation::Directory(data_dir.into()))
    }

    /// Engine that already holds its datasets
    pub fn preloaded(engine: Arc<dyn SqlEngine>) -> Self {
        Self::with_location(engine, DatasetLocation::Preloaded)
    }

    pub fn with_location(engine: Arc<dyn SqlEngine>, datasets: DatasetLocation) -> Self {
        Self { engine, datasets, ready: OnceCell::new() }
    }

    pub fn datasets(&self) -> &DatasetLocation {
        &self.datasets
    }

    /// Whether setup has completed successfully
    pub fn is_ready(&self) -> bool {
        matches!(self.ready.get(), Some(Ok(())))
    }

    /// The engine, running setup first if nobody has yet
    pub async fn get(&self) -> Result<Arc<dyn SqlEngine>> {
        let outcome = self
            .ready
            .get_or_init(|| async {
                self.setup().await.map_err(|e| {
                    tracing::error!(engine = self.engine.name(), error = %e, "engine setup failed");
                    e.to_string()
                })
            })
            .await;

        match outcome {
            Ok(()) => Ok(Arc::clone(&self.engine)),
            Err(reason) => Err(GeopromptError::EngineSetup { reason: reason.clone() }),
        }
    }

    async fn setup(&self) -> Result<()> {
        self.engine.load_extension(SPATIAL_EXTENSION).await?;

        let DatasetLocation::Directory(dir) = &self.datasets else {
            tracing::info!(engine = self.engine.name(), "engine ready with preloaded datasets");
            return Ok(());
        };

        for data_type in DataType::ALL {
            let name = data_type.source_name();
            let path = dir.join(&name);
            let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => GeopromptError::DatasetNotFound { path: path.clone() },
                _ => GeopromptError::Io(e),
            })?;

            validate_parquet(&name, &bytes)?;
            let size = bytes.len();
            self.engine.register_source(&name, bytes).await?;
            tracing::info!(dataset = %data_type, bytes = size, "registered dataset");
        }

        tracing::info!(engine = self.engine.name(), dir = %dir.display(), "engine ready");
        Ok(())
    }
}
