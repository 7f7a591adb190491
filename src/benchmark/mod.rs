//! Benchmark Module - Warm-up, sampling, aggregation and the comparison driver

pub mod aggregate;
pub mod orchestrator;
pub mod policy;
pub mod result;
pub mod sampler;
pub mod warmup;

pub use aggregate::mean;
pub use orchestrator::run_comparison;
pub use policy::{HintPolicy, DEFAULT_CANONICAL_INDEX};
pub use result::{BenchmarkResult, Comparison, ExecutionSample};
pub use sampler::{sample, SampleSet};
pub use warmup::warm_up;
