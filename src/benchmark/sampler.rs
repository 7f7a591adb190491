//! Execution Sampler - Sequential explained runs of one pipeline

use crate::benchmark::aggregate::mean;
use crate::benchmark::result::{BenchmarkResult, ExecutionSample};
use crate::error::Result;
use crate::execution::adapter::{ExecutionAdapter, Pipeline};
use crate::execution::hint::ExecutionOptions;
use crate::execution::plan::find_index_node;
use tracing::debug;

/// Samples from one sampling pass plus metadata read off the first run
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub samples: Vec<ExecutionSample>,
    pub index_name: Option<String>,
    pub plan_cache_key: Option<String>,
}

impl SampleSet {
    /// Reduce the samples to a `BenchmarkResult`
    pub fn summarize(&self, used_hint: bool) -> Result<BenchmarkResult> {
        let works: Vec<f64> = self.samples.iter().map(|s| s.works as f64).collect();
        let n_returned: Vec<f64> = self.samples.iter().map(|s| s.n_returned as f64).collect();
        let time: Vec<f64> = self.samples.iter().map(|s| s.time_millis).collect();

        Ok(BenchmarkResult {
            used_hint,
            mean_works: mean(&works)?,
            mean_n_returned: mean(&n_returned)?,
            mean_time_millis: mean(&time)?,
            index_name: self.index_name.clone(),
            plan_cache_key: self.plan_cache_key.clone(),
            sample_count: self.samples.len(),
        })
    }
}

/// Run `query` `sample_count` times with explain, one after another.
///
/// Index name and plan cache key come from the first run only. The first
/// adapter error ends sampling and is returned as is.
pub async fn sample(
    query: &Pipeline,
    adapter: &dyn ExecutionAdapter,
    sample_count: usize,
    options: &ExecutionOptions,
) -> Result<SampleSet> {
    let mut samples = Vec::with_capacity(sample_count);
    let mut index_name = None;
    let mut plan_cache_key = None;

    for run in 1..=sample_count {
        let stats = adapter.explain(query, options).await?;

        if run == 1 {
            plan_cache_key = stats.plan_cache_key.clone();
            index_name = stats
                .input_stage
                .as_ref()
                .and_then(find_index_node)
                .map(|scan| scan.index_name);
        }

        debug!(
            run,
            works = stats.works,
            n_returned = stats.n_returned,
            time_millis = stats.execution_time_millis,
            "sampled run"
        );

        samples.push(ExecutionSample {
            works: stats.works,
            n_returned: stats.n_returned,
            time_millis: stats.execution_time_millis,
        });
    }

    Ok(SampleSet {
        samples,
        index_name,
        plan_cache_key,
    })
}
