//! Execution Module - Everything the harness knows about the query engine
//!
//! - ExecutionAdapter trait for pluggable backends
//! - ExecutionStatistics decoded from explain output
//! - PlanStageNode tree and the index-attribution walk
//! - HintSpec / ExecutionOptions passed through to the backend
//! - ReplayAdapter serving recorded explain output

pub mod adapter;
pub mod explain;
pub mod hint;
pub mod plan;
pub mod replay;
pub mod result;

pub use adapter::{ExecutionAdapter, Pipeline};
pub use explain::ExecutionStatistics;
pub use hint::{ExecutionOptions, HintSpec, IndexKey, SortDirection};
pub use plan::{find_index_node, IndexScan, PlanStageNode, COLLSCAN_INDEX_NAME};
pub use replay::{RecordedExplain, Recording, ReplayAdapter};
pub use result::QueryResult;
