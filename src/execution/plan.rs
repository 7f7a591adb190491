//! Plan Tree - Execution-plan stages reported by explain output
//!
//! The engine reports its physical plan as a nested stage document. Only the
//! shapes that matter for index attribution are modelled; everything else
//! collapses into `Unknown`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Index name reported for full collection scans
pub const COLLSCAN_INDEX_NAME: &str = "COLLSCAN";

/// Leaf stage answered through a named index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexScan {
    pub index_name: String,
}

impl IndexScan {
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
        }
    }

    /// Stand-in for a collection scan so callers see one result type
    pub fn collection_scan() -> Self {
        Self::new(COLLSCAN_INDEX_NAME)
    }
}

/// A node of the execution-plan tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanStageNode {
    IndexScan(IndexScan),
    CollectionScan,
    /// Merge of several sorted inputs; only the first branch names the index
    MergeJunction { branches: Vec<PlanStageNode> },
    /// Single-input stage (FETCH, SORT, PROJECTION, LIMIT, ...)
    Wrapper {
        stage: String,
        child: Box<PlanStageNode>,
    },
    Unknown { stage: Option<String> },
}

impl PlanStageNode {
    pub fn index_scan(index_name: impl Into<String>) -> Self {
        PlanStageNode::IndexScan(IndexScan::new(index_name))
    }

    pub fn wrapper(stage: impl Into<String>, child: PlanStageNode) -> Self {
        PlanStageNode::Wrapper {
            stage: stage.into(),
            child: Box::new(child),
        }
    }

    /// Decode a stage document from explain output.
    ///
    /// Never fails: shapes that are not recognised become `Unknown`.
    pub fn from_explain(stage: &Value) -> Self {
        let name = stage.get("stage").and_then(Value::as_str);

        match name {
            Some("IXSCAN") => match stage.get("indexName").and_then(Value::as_str) {
                Some(index_name) if !index_name.is_empty() => PlanStageNode::index_scan(index_name),
                _ => PlanStageNode::Unknown {
                    stage: Some("IXSCAN".to_string()),
                },
            },
            Some("COLLSCAN") => PlanStageNode::CollectionScan,
            Some("SORT_MERGE") => {
                let branches = stage
                    .get("inputStages")
                    .and_then(Value::as_array)
                    .map(|inputs| inputs.iter().map(PlanStageNode::from_explain).collect())
                    .unwrap_or_default();
                PlanStageNode::MergeJunction { branches }
            }
            _ => match stage.get("inputStage") {
                Some(child) if child.is_object() => PlanStageNode::Wrapper {
                    stage: name.unwrap_or("UNNAMED").to_string(),
                    child: Box::new(PlanStageNode::from_explain(child)),
                },
                _ => PlanStageNode::Unknown {
                    stage: name.map(str::to_string),
                },
            },
        }
    }
}

/// Find the stage that tells which index answered the query.
///
/// Merge junctions are followed through their first branch only. Collection
/// scans yield a synthesized `IndexScan` named `COLLSCAN`.
pub fn find_index_node(root: &PlanStageNode) -> Option<IndexScan> {
    let mut current = root;
    loop {
        match current {
            PlanStageNode::IndexScan(scan) => return Some(scan.clone()),
            PlanStageNode::CollectionScan => return Some(IndexScan::collection_scan()),
            PlanStageNode::MergeJunction { branches } => current = branches.first()?,
            PlanStageNode::Wrapper { child, .. } => current = child.as_ref(),
            PlanStageNode::Unknown { .. } => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_scan_inside_two_wrappers() {
        let plan = PlanStageNode::wrapper(
            "SORT",
            PlanStageNode::wrapper("FETCH", PlanStageNode::index_scan("a_1")),
        );

        assert_eq!(find_index_node(&plan), Some(IndexScan::new("a_1")));
    }

    #[test]
    fn test_bare_collection_scan() {
        let found = find_index_node(&PlanStageNode::CollectionScan).unwrap();
        assert_eq!(found.index_name, "COLLSCAN");
    }

    #[test]
    fn test_merge_junction_uses_first_branch() {
        let plan = PlanStageNode::MergeJunction {
            branches: vec![
                PlanStageNode::index_scan("x_1"),
                PlanStageNode::index_scan("y_1"),
            ],
        };

        assert_eq!(find_index_node(&plan), Some(IndexScan::new("x_1")));
    }

    #[test]
    fn test_merge_junction_without_branches() {
        let plan = PlanStageNode::MergeJunction { branches: vec![] };
        assert_eq!(find_index_node(&plan), None);
    }

    #[test]
    fn test_unknown_stage_has_no_index() {
        assert_eq!(find_index_node(&PlanStageNode::Unknown { stage: None }), None);

        let plan = PlanStageNode::wrapper("LIMIT", PlanStageNode::Unknown { stage: Some("EOF".into()) });
        assert_eq!(find_index_node(&plan), None);
    }

    #[test]
    fn test_deep_wrapper_chain() {
        let mut plan = PlanStageNode::index_scan("deep_1");
        for _ in 0..10_000 {
            plan = PlanStageNode::wrapper("PROJECTION_SIMPLE", plan);
        }

        assert_eq!(find_index_node(&plan).unwrap().index_name, "deep_1");

        // Unwind iteratively so dropping the chain doesn't recurse either
        let mut current = plan;
        while let PlanStageNode::Wrapper { child, .. } = current {
            current = *child;
        }
    }

    #[test]
    fn test_decode_fetch_over_index_scan() {
        let stage = json!({
            "stage": "FETCH",
            "nReturned": 12,
            "inputStage": {
                "stage": "IXSCAN",
                "keyPattern": { "countries": 1, "rated": 1, "released": 1 },
                "indexName": "countries_1_rated_1_released_1"
            }
        });

        let plan = PlanStageNode::from_explain(&stage);
        assert_eq!(
            plan,
            PlanStageNode::wrapper("FETCH", PlanStageNode::index_scan("countries_1_rated_1_released_1"))
        );
    }

    #[test]
    fn test_decode_sort_merge() {
        let stage = json!({
            "stage": "SORT_MERGE",
            "inputStages": [
                { "stage": "IXSCAN", "indexName": "countries_1_released_1" },
                { "stage": "IXSCAN", "indexName": "rated_1_released_1" }
            ]
        });

        let found = find_index_node(&PlanStageNode::from_explain(&stage)).unwrap();
        assert_eq!(found.index_name, "countries_1_released_1");
    }

    #[test]
    fn test_decode_unrecognised_shapes() {
        assert_eq!(
            PlanStageNode::from_explain(&json!({ "stage": "EOF" })),
            PlanStageNode::Unknown { stage: Some("EOF".to_string()) }
        );
        assert_eq!(
            PlanStageNode::from_explain(&json!("not a stage")),
            PlanStageNode::Unknown { stage: None }
        );
        // An index scan that doesn't name its index can't be attributed
        assert_eq!(
            find_index_node(&PlanStageNode::from_explain(&json!({ "stage": "IXSCAN" }))),
            None
        );
    }
}
