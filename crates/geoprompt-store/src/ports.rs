use async_trait::async_trait;
use geoprompt_core::error::Result;
use serde::Serialize;

/// Engine-native value, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum EngineValue {
    Null,
    Boolean(bool),
    Int(i64),
    HugeInt(i128),
    UInt(u64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
    List(Vec<EngineValue>),
    Struct(Vec<(String, EngineValue)>),
}

impl EngineValue {
    /// SQL type name as reported by schema description
    pub fn type_name(&self) -> &'static str {
        match self {
            EngineValue::Null => "NULL",
            EngineValue::Boolean(_) => "BOOLEAN",
            EngineValue::Int(_) => "BIGINT",
            EngineValue::HugeInt(_) => "HUGEINT",
            EngineValue::UInt(_) => "UBIGINT",
            EngineValue::Float(_) => "DOUBLE",
            EngineValue::Text(_) => "VARCHAR",
            EngineValue::Blob(_) => "BLOB",
            EngineValue::List(_) => "LIST",
            EngineValue::Struct(_) => "STRUCT",
        }
    }
}

impl From<&str> for EngineValue {
    fn from(value: &str) -> Self {
        EngineValue::Text(value.to_string())
    }
}

impl From<i64> for EngineValue {
    fn from(value: i64) -> Self {
        EngineValue::Int(value)
    }
}

impl From<f64> for EngineValue {
    fn from(value: f64) -> Self {
        EngineValue::Float(value)
    }
}

/// One result row: column name and value, in column order
pub type EngineRow = Vec<(String, EngineValue)>;

/// One column of a dataset schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { name: name.into(), data_type: data_type.into() }
    }
}

/// Port for the embedded analytical SQL engine
#[async_trait]
pub trait SqlEngine: Send + Sync {
    /// Install and load an engine extension
    async fn load_extension(&self, name: &str) -> Result<()>;

    /// Make a dataset file available to queries under `name`
    /// (e.g. `buildings.parquet`)
    async fn register_source(&self, name: &str, bytes: Vec<u8>) -> Result<()>;

    /// Run a query; faults are reported as `GeopromptError::QueryExecution`
    async fn execute(&self, sql: &str) -> Result<Vec<EngineRow>>;

    /// Columns of a dataset (e.g. `buildings`)
    async fn describe_schema(&self, dataset: &str) -> Result<Vec<ColumnInfo>>;

    /// Short identifier for logs
    fn name(&self) -> &str;
}
