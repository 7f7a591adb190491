//! Query-plan benchmarking harness
//!
//! Measures a pipeline under the plan the engine picks on its own, then again
//! under a forced index hint, and reports both side by side.

pub mod benchmark;
pub mod config;
pub mod error;
pub mod execution;

pub use benchmark::{run_comparison, BenchmarkResult, Comparison, HintPolicy};
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use execution::{ExecutionAdapter, ExecutionOptions, HintSpec, Pipeline};
