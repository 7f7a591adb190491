//! Benchmark configuration
//!
//! Sources, lowest precedence first: built-in defaults, a JSON file, then
//! `PLAN_BENCH_*` environment variables (a `.env` file is honoured).

use crate::benchmark::policy::HintPolicy;
use crate::error::{BenchError, Result};
use crate::execution::hint::HintSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SAMPLE_COUNT: usize = 10;

pub const ENV_SAMPLE_COUNT: &str = "PLAN_BENCH_SAMPLE_COUNT";
pub const ENV_CANONICAL_INDEX: &str = "PLAN_BENCH_CANONICAL_INDEX";
pub const ENV_NARROW_HINT: &str = "PLAN_BENCH_NARROW_HINT";
pub const ENV_WIDE_HINT: &str = "PLAN_BENCH_WIDE_HINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Warm-up runs and sampled runs per pass
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    #[serde(default)]
    pub hint_policy: HintPolicy,
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            hint_policy: HintPolicy::default(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BenchError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| BenchError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the environment
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply any `PLAN_BENCH_*` variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        dotenv::dotenv().ok();
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_SAMPLE_COUNT) {
            self.sample_count = raw.trim().parse().map_err(|_| {
                BenchError::Config(format!("{} must be a positive integer, got '{}'", ENV_SAMPLE_COUNT, raw))
            })?;
        }
        if let Some(name) = lookup(ENV_CANONICAL_INDEX) {
            self.hint_policy.canonical_index_name = name.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_NARROW_HINT) {
            self.hint_policy.narrow_hint = raw.parse::<HintSpec>()?;
        }
        if let Some(raw) = lookup(ENV_WIDE_HINT) {
            self.hint_policy.wide_hint = raw.parse::<HintSpec>()?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(BenchError::Config("sample_count must be at least 1".to_string()));
        }
        self.hint_policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BenchConfig::default();
        assert_eq!(config.sample_count, 10);
        assert_eq!(config.hint_policy.canonical_index_name, "countries_1_rated_1_released_1");
        assert_eq!(config.hint_policy.wide_hint.to_string(), "countries:1,rated:1,released:1");
    }

    #[test]
    fn test_overrides() {
        let config = BenchConfig::default()
            .with_overrides(lookup_from(&[
                (ENV_SAMPLE_COUNT, "25"),
                (ENV_CANONICAL_INDEX, "genres_1_year_1"),
                (ENV_NARROW_HINT, "genres:1"),
            ]))
            .unwrap();

        assert_eq!(config.sample_count, 25);
        assert_eq!(config.hint_policy.canonical_index_name, "genres_1_year_1");
        assert_eq!(config.hint_policy.narrow_hint.to_string(), "genres:1");
        assert_eq!(config.hint_policy.wide_hint, HintPolicy::default().wide_hint);
    }

    #[test]
    fn test_bad_overrides() {
        assert!(BenchConfig::default()
            .with_overrides(lookup_from(&[(ENV_SAMPLE_COUNT, "0")]))
            .is_err());
        assert!(BenchConfig::default()
            .with_overrides(lookup_from(&[(ENV_SAMPLE_COUNT, "ten")]))
            .is_err());
        assert!(BenchConfig::default()
            .with_overrides(lookup_from(&[(ENV_WIDE_HINT, "rated:0")]))
            .is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: BenchConfig = serde_json::from_str(r#"{ "sample_count": 3 }"#).unwrap();
        assert_eq!(config.sample_count, 3);
        assert_eq!(config.hint_policy, HintPolicy::default());

        let config: BenchConfig = serde_json::from_str(
            r#"{
                "hint_policy": {
                    "canonical_index_name": "a_1",
                    "narrow_hint": { "a": 1 },
                    "wide_hint": { "a": 1, "b": -1 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.sample_count, DEFAULT_SAMPLE_COUNT);
        assert_eq!(config.hint_policy.wide_hint.to_string(), "a:1,b:-1");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("plan_bench_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "sample_count": 4 }"#).unwrap();

        let config = BenchConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.sample_count, 4);

        assert!(matches!(
            BenchConfig::load("/nonexistent/plan-bench.json"),
            Err(BenchError::Config(_))
        ));
    }
}
