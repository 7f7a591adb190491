//! Index hints and per-execution options

use crate::error::BenchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Key direction inside an index key pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(SortDirection::Ascending),
            -1 => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Ordered field/direction mapping that forces the engine onto one index.
///
/// Key order is significant: `{countries: 1, released: 1}` and
/// `{released: 1, countries: 1}` name different indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct HintSpec {
    keys: Vec<IndexKey>,
}

impl HintSpec {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Append a key, replacing the direction if the field is already present
    pub fn with_key(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        let field = field.into();
        match self.keys.iter_mut().find(|k| k.field == field) {
            Some(existing) => existing.direction = direction,
            None => self.keys.push(IndexKey { field, direction }),
        }
        self
    }

    pub fn ascending(self, field: impl Into<String>) -> Self {
        self.with_key(field, SortDirection::Ascending)
    }

    pub fn keys(&self) -> &[IndexKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Hint as the key-pattern document the engine expects
    pub fn to_document(&self) -> Value {
        Value::Object(self.clone().into())
    }
}

impl Default for HintSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HintSpec> for Map<String, Value> {
    fn from(hint: HintSpec) -> Self {
        hint.keys
            .into_iter()
            .map(|k| (k.field, Value::from(k.direction.as_i32())))
            .collect()
    }
}

impl TryFrom<Map<String, Value>> for HintSpec {
    type Error = BenchError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut hint = HintSpec::new();
        for (field, value) in map {
            let direction = value
                .as_i64()
                .and_then(SortDirection::from_i64)
                .ok_or_else(|| {
                    BenchError::Config(format!(
                        "hint field '{}' must have direction 1 or -1, got {}",
                        field, value
                    ))
                })?;
            hint = hint.with_key(field, direction);
        }
        Ok(hint)
    }
}

/// Compact form used on the command line and in the environment:
/// `countries:1,released:1`. A bare field name means ascending.
impl FromStr for HintSpec {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hint = HintSpec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (field, direction) = match part.split_once(':') {
                Some((field, dir)) => {
                    let direction = dir
                        .trim()
                        .parse::<i64>()
                        .ok()
                        .and_then(SortDirection::from_i64)
                        .ok_or_else(|| {
                            BenchError::Config(format!("invalid direction in hint key '{}'", part))
                        })?;
                    (field.trim(), direction)
                }
                None => (part, SortDirection::Ascending),
            };
            if field.is_empty() {
                return Err(BenchError::Config(format!("missing field name in hint key '{}'", part)));
            }
            hint = hint.with_key(field, direction);
        }

        if hint.is_empty() {
            return Err(BenchError::Config(format!("hint '{}' has no keys", s)));
        }
        Ok(hint)
    }
}

impl fmt::Display for HintSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self
            .keys
            .iter()
            .map(|k| format!("{}:{}", k.field, k.direction.as_i32()))
            .collect();
        write!(f, "{}", keys.join(","))
    }
}

/// Options passed through to the adapter for a single execution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<HintSpec>,
}

impl ExecutionOptions {
    pub fn with_hint(hint: HintSpec) -> Self {
        Self { hint: Some(hint) }
    }

    pub fn uses_hint(&self) -> bool {
        self.hint.is_some()
    }
}
