use std::sync::Arc;

use geoprompt_core::models::{DataType, Row};
use geoprompt_core::{GeopromptError, QueryExecutionError, Result};

use crate::normalize::normalize_row;
use crate::ports::ColumnInfo;
use crate::shared::SharedEngine;

/// Runs SQL through the shared engine and normalizes the rows.
///
/// Zero rows is a normal outcome. Engine faults come back as
/// `GeopromptError::QueryExecution` and are never retried.
#[derive(Clone)]
pub struct QueryExecutor {
    engine: Arc<SharedEngine>,
}

fn as_query_error(error: GeopromptError) -> GeopromptError {
    match error {
        GeopromptError::QueryExecution(e) => GeopromptError::QueryExecution(e),
        other if other.is_fatal() => other,
        other => QueryExecutionError::new(other.to_string()).into(),
    }
}

impl QueryExecutor {
    pub fn new(engine: Arc<SharedEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<SharedEngine> {
        &self.engine
    }

    /// Execute a query
    pub async fn execute(&self, sql: &str) -> Result<Vec<Row>> {
        let engine = self.engine.get().await?;
        let rows = engine.execute(sql).await.map_err(as_query_error)?;

        tracing::info!(engine = engine.name(), rows = rows.len(), "query executed");
        Ok(rows.into_iter().map(normalize_row).collect())
    }

    /// Column names and types of a dataset
    pub async fn describe_schema(&self, data_type: DataType) -> Result<Vec<ColumnInfo>> {
        let engine = self.engine.get().await?;
        engine.describe_schema(data_type.as_str()).await.map_err(as_query_error)
    }
}
