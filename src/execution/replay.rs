//! Replay Adapter - Serves captured explain output instead of a live engine
//!
//! A recording holds `explain("executionStats")` documents captured once per
//! hint (plus one for the unhinted run). Replaying them lets a comparison be
//! rerun offline, reviewed in CI, or shared without database access.

use crate::error::{BenchError, Result};
use crate::execution::adapter::{ExecutionAdapter, Pipeline};
use crate::execution::explain::ExecutionStatistics;
use crate::execution::hint::{ExecutionOptions, HintSpec};
use crate::execution::result::QueryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// One captured explain document and the hint it was captured under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedExplain {
    #[serde(default)]
    pub hint: Option<HintSpec>,
    pub explain: Value,
}

/// On-disk recording format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub description: Option<String>,
    pub explains: Vec<RecordedExplain>,
}

impl Recording {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BenchError::Recording(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            BenchError::Recording(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Adapter that answers every query from a recording
pub struct ReplayAdapter {
    recording: Recording,
}

impl ReplayAdapter {
    pub fn new(recording: Recording) -> Result<Self> {
        if recording.explains.is_empty() {
            return Err(BenchError::Recording("recording contains no explain output".to_string()));
        }
        Ok(Self { recording })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Recording::load(path)?)
    }

    fn lookup(&self, options: &ExecutionOptions) -> Result<&Value> {
        self.recording
            .explains
            .iter()
            .find(|entry| entry.hint == options.hint)
            .map(|entry| &entry.explain)
            .ok_or_else(|| {
                let hint = options
                    .hint
                    .as_ref()
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| "none".to_string());
                BenchError::Adapter(format!("no recorded explain output for hint {}", hint))
            })
    }
}

#[async_trait]
impl ExecutionAdapter for ReplayAdapter {
    fn name(&self) -> &str {
        "replay"
    }

    async fn execute(&self, _query: &Pipeline, options: &ExecutionOptions) -> Result<QueryResult> {
        let stats = ExecutionStatistics::from_explain(self.lookup(options)?)?;
        Ok(QueryResult::new(
            self.name(),
            stats.n_returned,
            stats.execution_time_millis.round() as u64,
        ))
    }

    async fn explain(
        &self,
        _query: &Pipeline,
        options: &ExecutionOptions,
    ) -> Result<ExecutionStatistics> {
        let stats = ExecutionStatistics::from_explain(self.lookup(options)?)?;
        debug!(works = stats.works, n_returned = stats.n_returned, "replayed explain output");
        Ok(stats)
    }
}
