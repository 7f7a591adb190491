//! Execution Adapter Trait - Contract between the harness and a query engine
//!
//! The harness never talks to a database directly. Connection lifecycle, the
//! query language and wire protocol all live behind this trait; the caller
//! owns the adapter and hands it in already connected.

use crate::error::Result;
use crate::execution::explain::ExecutionStatistics;
use crate::execution::hint::ExecutionOptions;
use crate::execution::result::QueryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Aggregation pipeline, passed through to the adapter untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    pub stages: Vec<Value>,
}

impl Pipeline {
    pub fn new(stages: Vec<Value>) -> Self {
        Self { stages }
    }
}

/// Execution adapter trait - all query backends must implement this
#[async_trait]
pub trait ExecutionAdapter: Send + Sync {
    /// Adapter name (e.g., "replay")
    fn name(&self) -> &str;

    /// Run the query and discard its output
    async fn execute(&self, query: &Pipeline, options: &ExecutionOptions) -> Result<QueryResult>;

    /// Run the query with execution-statistics explain
    async fn explain(
        &self,
        query: &Pipeline,
        options: &ExecutionOptions,
    ) -> Result<ExecutionStatistics>;
}
