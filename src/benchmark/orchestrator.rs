//! Benchmark Orchestrator - Automatic plan versus hinted plan
//!
//! One comparison is five strictly ordered phases: warm-up and sampling
//! without a hint, hint selection from the automatic result, then warm-up and
//! sampling again under that hint. Any failure aborts the whole comparison.

use crate::benchmark::result::{BenchmarkResult, Comparison};
use crate::benchmark::sampler::sample;
use crate::benchmark::warmup::warm_up;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::execution::adapter::{ExecutionAdapter, Pipeline};
use crate::execution::hint::ExecutionOptions;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Run a full comparison of `query` against `adapter`.
///
/// Issues `2 * sample_count` warm-up executions and `2 * sample_count`
/// explained executions. The adapter's connection is neither opened nor
/// closed here.
pub async fn run_comparison(
    query: &Pipeline,
    adapter: Arc<dyn ExecutionAdapter>,
    config: &BenchConfig,
) -> Result<Comparison> {
    config.validate()?;

    let run_id = Uuid::new_v4();
    let query = Arc::new(query.clone());
    info!(%run_id, adapter = adapter.name(), sample_count = config.sample_count, "starting plan comparison");

    let automatic = run_pass(&query, &adapter, config.sample_count, ExecutionOptions::default()).await?;

    let hint = config
        .hint_policy
        .select(automatic.index_name.as_deref())
        .clone();
    info!(
        %run_id,
        automatic_index = automatic.index_name.as_deref().unwrap_or("none"),
        hint = %hint,
        "selected comparison hint"
    );

    let hinted = run_pass(&query, &adapter, config.sample_count, ExecutionOptions::with_hint(hint.clone())).await?;

    Ok(Comparison {
        run_id,
        automatic,
        hinted,
        hint,
        finished_at: Utc::now(),
    })
}

/// Warm-up followed by sampling under one option set
async fn run_pass(
    query: &Arc<Pipeline>,
    adapter: &Arc<dyn ExecutionAdapter>,
    sample_count: usize,
    options: ExecutionOptions,
) -> Result<BenchmarkResult> {
    let used_hint = options.uses_hint();
    let started = Instant::now();

    warm_up(query, adapter, sample_count, &options).await?;
    info!(used_hint, elapsed_ms = started.elapsed().as_millis() as u64, "warm-up finished");

    let samples = sample(query, adapter.as_ref(), sample_count, &options).await?;
    let result = samples.summarize(used_hint)?;
    info!(
        used_hint,
        mean_works = result.mean_works,
        mean_time_millis = result.mean_time_millis,
        index_name = result.index_name.as_deref().unwrap_or("none"),
        "sampling finished"
    );

    Ok(result)
}
