//! In-memory engine for development and testing.
//!
//! Answers a query with the rows of the one dataset it references, honoring a
//! trailing `LIMIT`. Other clauses are not evaluated.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use async_trait::async_trait;
use geoprompt_core::{QueryExecutionError, Result};
use regex::Regex;

use crate::ports::{ColumnInfo, EngineRow, SqlEngine};

static SOURCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfrom\s+(?:read_parquet\(\s*'([A-Za-z_]+)(?:\.parquet)?'\s*\)|([A-Za-z_]+))")
        .expect("source pattern is valid")
});

static LIMIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blimit\s+(\d+)\s*;?\s*$").expect("limit pattern is valid"));

/// Dataset a query reads from (`read_parquet('roads.parquet')` or `FROM roads`)
pub fn referenced_dataset(sql: &str) -> Option<String> {
    let captures = SOURCE_PATTERN.captures(sql)?;
    captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str().to_lowercase())
}

/// Trailing `LIMIT n` of a query
pub fn trailing_limit(sql: &str) -> Option<usize> {
    LIMIT_PATTERN.captures(sql)?.get(1)?.as_str().parse().ok()
}

fn dataset_stem(name: &str) -> &str {
    name.strip_suffix(".parquet").unwrap_or(name)
}

/// In-memory implementation of SqlEngine
#[derive(Debug, Default)]
pub struct MemoryEngine {
    tables: RwLock<HashMap<String, Vec<EngineRow>>>,
    registrations: RwLock<Vec<String>>,
    extensions: RwLock<Vec<String>>,
}

impl MemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows of a dataset
    pub fn insert_rows(&self, dataset: &str, rows: Vec<EngineRow>) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.insert(dataset_stem(dataset).to_string(), rows);
    }

    /// Names passed to `register_source`, in call order
    pub fn registrations(&self) -> Vec<String> {
        self.registrations.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Extensions loaded so far, in call order
    pub fn extensions(&self) -> Vec<String> {
        self.extensions.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn rows_of(&self, dataset: &str) -> std::result::Result<Vec<EngineRow>, QueryExecutionError> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(dataset).cloned().ok_or_else(|| {
            QueryExecutionError::new(format!(
                "Catalog Error: Table with name {} does not exist!",
                dataset
            ))
        })
    }
}

#[async_trait]
impl SqlEngine for MemoryEngine {
    async fn load_extension(&self, name: &str) -> Result<()> {
        self.extensions.write().unwrap_or_else(PoisonError::into_inner).push(name.to_string());
        Ok(())
    }

    async fn register_source(&self, name: &str, _bytes: Vec<u8>) -> Result<()> {
        self.registrations.write().unwrap_or_else(PoisonError::into_inner).push(name.to_string());
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        tables.entry(dataset_stem(name).to_string()).or_default();
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<Vec<EngineRow>> {
        let trimmed = sql.trim_start();
        let is_select = trimmed
            .get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("select"));
        if !is_select {
            return Err(QueryExecutionError::new(format!(
                "Parser Error: syntax error at or near \"{}\"",
                trimmed.split_whitespace().next().unwrap_or_default()
            ))
            .into());
        }

        let dataset = referenced_dataset(sql).ok_or_else(|| {
            QueryExecutionError::new("Binder Error: query does not reference a dataset")
        })?;

        let mut rows = self.rows_of(&dataset)?;
        if let Some(limit) = trailing_limit(sql) {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn describe_schema(&self, dataset: &str) -> Result<Vec<ColumnInfo>> {
        let rows = self.rows_of(dataset_stem(dataset))?;
        let columns = rows
            .first()
            .map(|row| {
                row.iter()
                    .map(|(name, value)| ColumnInfo::new(name.clone(), value.type_name()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(columns)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
