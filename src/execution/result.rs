//! Query Result - What a plain (non-explained) execution reports back

use serde::{Deserialize, Serialize};

/// Summary of one executed query; the documents themselves are discarded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Number of documents produced
    pub row_count: u64,

    /// Execution time in milliseconds, as observed by the adapter
    pub execution_time_ms: u64,

    /// Adapter that executed the query
    pub adapter_name: String,
}

impl QueryResult {
    pub fn new(adapter_name: impl Into<String>, row_count: u64, execution_time_ms: u64) -> Self {
        Self {
            row_count,
            execution_time_ms,
            adapter_name: adapter_name.into(),
        }
    }
}
