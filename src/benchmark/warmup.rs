//! Warm-up Runner - Concurrent unexplained runs that prime the plan cache

use crate::error::Result;
use crate::execution::adapter::{ExecutionAdapter, Pipeline};
use crate::execution::hint::ExecutionOptions;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

/// Dispatch `run_count` concurrent executions of `query` and wait for all.
///
/// Results are discarded. The first failure is returned and the remaining
/// in-flight runs are aborted when the set is dropped.
pub async fn warm_up(
    query: &Arc<Pipeline>,
    adapter: &Arc<dyn ExecutionAdapter>,
    run_count: usize,
    options: &ExecutionOptions,
) -> Result<()> {
    debug!(run_count, adapter = adapter.name(), hinted = options.uses_hint(), "dispatching warm-up runs");

    let mut runs = JoinSet::new();
    for _ in 0..run_count {
        let query = Arc::clone(query);
        let adapter = Arc::clone(adapter);
        let options = options.clone();
        runs.spawn(async move { adapter.execute(&query, &options).await });
    }

    while let Some(joined) = runs.join_next().await {
        joined??;
    }

    Ok(())
}
