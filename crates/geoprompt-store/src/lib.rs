//! GeoPrompt Store - Query execution over the dataset engine
//!
//! This crate defines the SQL engine port, the shared lazily initialized
//! engine handle, row normalization, and the engine adapters: an in-memory
//! engine for development and tests, and embedded DuckDB behind the `duckdb`
//! feature.

#[cfg(feature = "duckdb")]
pub mod duckdb;
pub mod executor;
pub mod memory;
pub mod normalize;
pub mod ports;
pub mod sample;
pub mod shared;

#[cfg(feature = "duckdb")]
pub use self::duckdb::DuckDbEngine;
pub use executor::QueryExecutor;
pub use memory::MemoryEngine;
pub use normalize::{normalize_row, normalize_value};
pub use ports::{ColumnInfo, EngineRow, EngineValue, SqlEngine};
pub use shared::{validate_parquet, DatasetLocation, SharedEngine, PARQUET_MAGIC};
