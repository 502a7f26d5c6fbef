//! Embedded DuckDB engine.
//!
//! DuckDB calls are blocking, so every call runs on the blocking pool with
//! the connection behind a mutex.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use ::duckdb::types::Value;
use ::duckdb::Connection;
use geoprompt_core::{GeopromptError, QueryExecutionError, Result};

use crate::ports::{ColumnInfo, EngineRow, EngineValue, SqlEngine};

/// DuckDB implementation of SqlEngine
pub struct DuckDbEngine {
    connection: Arc<Mutex<Connection>>,
    /// Registered sources are staged here; queries resolve file names against it
    staging_dir: PathBuf,
}

fn setup_error(e: impl std::fmt::Display) -> GeopromptError {
    GeopromptError::EngineSetup { reason: e.to_string() }
}

fn query_error(e: impl std::fmt::Display) -> GeopromptError {
    QueryExecutionError::new(e.to_string()).into()
}

fn convert(value: Value) -> EngineValue {
    match value {
        Value::Null => EngineValue::Null,
        Value::Boolean(b) => EngineValue::Boolean(b),
        Value::TinyInt(i) => EngineValue::Int(i.into()),
        Value::SmallInt(i) => EngineValue::Int(i.into()),
        Value::Int(i) => EngineValue::Int(i.into()),
        Value::BigInt(i) => EngineValue::Int(i),
        Value::HugeInt(i) => EngineValue::HugeInt(i),
        Value::UTinyInt(u) => EngineValue::Int(u.into()),
        Value::USmallInt(u) => EngineValue::Int(u.into()),
        Value::UInt(u) => EngineValue::Int(u.into()),
        Value::UBigInt(u) => EngineValue::UInt(u),
        Value::Float(f) => EngineValue::Float(f.into()),
        Value::Double(f) => EngineValue::Float(f),
        Value::Text(s) | Value::Enum(s) => EngineValue::Text(s),
        Value::Blob(bytes) => EngineValue::Blob(bytes),
        Value::List(items) | Value::Array(items) => {
            EngineValue::List(items.into_iter().map(convert).collect())
        }
        Value::Struct(fields) => EngineValue::Struct(
            fields.iter().map(|(name, value)| (name.clone(), convert(value.clone()))).collect(),
        ),
        other => EngineValue::Text(format!("{:?}", other)),
    }
}

impl DuckDbEngine {
    /// Open an in-memory database staging dataset files in `staging_dir`
    pub fn open(staging_dir: impl Into<PathBuf>) -> Result<Self> {
        let staging_dir = staging_dir.into();
        std::fs::create_dir_all(&staging_dir)?;

        let connection = Connection::open_in_memory().map_err(setup_error)?;
        connection
            .execute_batch(&format!(
                "SET file_search_path = '{}'",
                staging_dir.display().to_string().replace('\'', "''")
            ))
            .map_err(setup_error)?;

        Ok(Self { connection: Arc::new(Mutex::new(connection)), staging_dir })
    }

    async fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let connection = connection.lock().unwrap_or_else(PoisonError::into_inner);
            work(&connection)
        })
        .await
        .map_err(|e| query_error(format!("engine task failed: {}", e)))?
    }
}

fn run_query(connection: &Connection, sql: &str) -> Result<Vec<EngineRow>> {
    let mut statement = connection.prepare(sql).map_err(query_error)?;
    let mut rows = statement.query([]).map_err(query_error)?;
    let names: Vec<String> = rows.as_ref().map(|s| s.column_names()).unwrap_or_default();

    let mut result = Vec::new();
    while let Some(row) = rows.next().map_err(query_error)? {
        let mut converted = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let value: Value = row.get(index).map_err(query_error)?;
            converted.push((name.clone(), convert(value)));
        }
        result.push(converted);
    }
    Ok(result)
}

#[async_trait]
impl SqlEngine for DuckDbEngine {
    async fn load_extension(&self, name: &str) -> Result<()> {
        let name = name.to_string();
        self.with_connection(move |connection| {
            connection
                .execute_batch(&format!("INSTALL {name}; LOAD {name};"))
                .map_err(setup_error)
        })
        .await
    }

    async fn register_source(&self, name: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.staging_dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(source = %name, path = %path.display(), "staged dataset file");
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<Vec<EngineRow>> {
        let sql = sql.to_string();
        self.with_connection(move |connection| run_query(connection, &sql)).await
    }

    async fn describe_schema(&self, dataset: &str) -> Result<Vec<ColumnInfo>> {
        let sql = format!("DESCRIBE SELECT * FROM read_parquet('{}.parquet')", dataset);
        let rows = self.with_connection(move |connection| run_query(connection, &sql)).await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let mut name = None;
                let mut data_type = None;
                for (column, value) in row {
                    match (column.as_str(), value) {
                        ("column_name", EngineValue::Text(v)) => name = Some(v),
                        ("column_type", EngineValue::Text(v)) => data_type = Some(v),
                        _ => {}
                    }
                }
                Some(ColumnInfo::new(name?, data_type?))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "duckdb"
    }
}
