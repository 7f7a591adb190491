//! Hint Policy - Picks the hint for the comparison pass from the automatic result

use crate::error::{BenchError, Result};
use crate::execution::hint::HintSpec;
use serde::{Deserialize, Serialize};

/// Composite index the sample movie pipeline is expected to pick on its own
pub const DEFAULT_CANONICAL_INDEX: &str = "countries_1_rated_1_released_1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintPolicy {
    /// Index name that switches the comparison onto `narrow_hint`
    pub canonical_index_name: String,

    /// Used when the optimizer already chose the canonical index
    pub narrow_hint: HintSpec,

    /// Used for every other automatic choice, including no index at all
    pub wide_hint: HintSpec,
}

impl Default for HintPolicy {
    fn default() -> Self {
        Self {
            canonical_index_name: DEFAULT_CANONICAL_INDEX.to_string(),
            narrow_hint: HintSpec::new().ascending("countries").ascending("released"),
            wide_hint: HintSpec::new()
                .ascending("countries")
                .ascending("rated")
                .ascending("released"),
        }
    }
}

impl HintPolicy {
    /// Exact name match only; no prefix or key-pattern matching
    pub fn select(&self, automatic_index: Option<&str>) -> &HintSpec {
        if automatic_index == Some(self.canonical_index_name.as_str()) {
            &self.narrow_hint
        } else {
            &self.wide_hint
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.canonical_index_name.trim().is_empty() {
            return Err(BenchError::Config("canonical_index_name must not be empty".to_string()));
        }
        if self.narrow_hint.is_empty() || self.wide_hint.is_empty() {
            return Err(BenchError::Config("narrow_hint and wide_hint need at least one key".to_string()));
        }
        Ok(())
    }
}
