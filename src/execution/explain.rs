//! Execution statistics decoded from `explain("executionStats")` output

use crate::error::{BenchError, Result};
use crate::execution::plan::PlanStageNode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime statistics for one explained execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStatistics {
    /// Work units reported by the root execution stage
    pub works: u64,

    /// Documents returned by the root execution stage
    pub n_returned: u64,

    /// Total execution time in milliseconds
    pub execution_time_millis: f64,

    /// Input of the root execution stage, where index attribution starts
    pub input_stage: Option<PlanStageNode>,

    /// Identifier the engine uses to reuse a cached plan
    pub plan_cache_key: Option<String>,
}

impl ExecutionStatistics {
    /// Decode an explain document.
    ///
    /// Accepts both the pushed-down form, where `queryPlanner` and
    /// `executionStats` sit at the top level, and the pipeline form, where
    /// they are nested under `stages[0].$cursor`.
    pub fn from_explain(explain: &Value) -> Result<Self> {
        let root = cursor_section(explain).ok_or_else(|| {
            BenchError::MalformedExplain("no executionStats section in explain output".to_string())
        })?;

        let stats = &root["executionStats"];
        let stages = stats.get("executionStages").ok_or_else(|| {
            BenchError::MalformedExplain("executionStats has no executionStages".to_string())
        })?;

        let works = required_u64(stages, "works")?;
        let n_returned = required_u64(stages, "nReturned")?;
        let execution_time_millis = stats
            .get("executionTimeMillis")
            .and_then(Value::as_f64)
            .filter(|t| *t >= 0.0)
            .ok_or_else(|| {
                BenchError::MalformedExplain(
                    "executionTimeMillis missing or not a non-negative number".to_string(),
                )
            })?;

        let input_stage = stages
            .get("inputStage")
            .filter(|s| s.is_object())
            .map(PlanStageNode::from_explain);

        let plan_cache_key = root
            .get("queryPlanner")
            .and_then(|planner| planner.get("planCacheKey"))
            .and_then(|key| match key {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            });

        Ok(Self {
            works,
            n_returned,
            execution_time_millis,
            input_stage,
            plan_cache_key,
        })
    }
}

fn cursor_section(explain: &Value) -> Option<&Value> {
    if explain.get("executionStats").is_some() {
        return Some(explain);
    }

    explain
        .get("stages")
        .and_then(Value::as_array)
        .and_then(|stages| stages.first())
        .and_then(|first| first.get("$cursor"))
        .filter(|cursor| cursor.get("executionStats").is_some())
}

fn required_u64(stage: &Value, field: &str) -> Result<u64> {
    stage.get(field).and_then(Value::as_u64).ok_or_else(|| {
        BenchError::MalformedExplain(format!("executionStages.{} missing or not an integer", field))
    })
}
