//! Benchmark Results - Aggregated measurements and the printed report

use crate::execution::hint::HintSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Raw measurements from one explained run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSample {
    pub works: u64,
    pub n_returned: u64,
    pub time_millis: f64,
}

/// Summary of one benchmark pass (warm-up plus sampling) under one option set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub used_hint: bool,
    pub mean_works: f64,
    pub mean_n_returned: f64,
    pub mean_time_millis: f64,
    /// Index used by the first sampled run
    pub index_name: Option<String>,
    /// Plan cache key of the first sampled run
    pub plan_cache_key: Option<String>,
    pub sample_count: usize,
}

/// Automatic plan versus the hinted plan for the same pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub run_id: Uuid,
    pub automatic: BenchmarkResult,
    pub hinted: BenchmarkResult,
    /// Hint the second pass was forced onto
    pub hint: HintSpec,
    pub finished_at: DateTime<Utc>,
}

impl Comparison {
    /// Hinted mean time over automatic mean time; `None` if automatic took 0ms
    pub fn time_ratio(&self) -> Option<f64> {
        if self.automatic.mean_time_millis > 0.0 {
            Some(self.hinted.mean_time_millis / self.automatic.mean_time_millis)
        } else {
            None
        }
    }

    /// Whether both passes landed on the same index
    pub fn same_index(&self) -> bool {
        self.automatic.index_name == self.hinted.index_name
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("none")
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Used Hint: {}", if self.used_hint { "Yes" } else { "No" })?;
        writeln!(f, "Works: {}", self.mean_works)?;
        writeln!(f, "nReturned: {}", self.mean_n_returned)?;
        writeln!(f, "TimeMillis: {}", self.mean_time_millis)?;
        writeln!(f, "Index Name: {}", or_none(&self.index_name))?;
        writeln!(f, "Plan Cache Key: {}", or_none(&self.plan_cache_key))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(50);
        writeln!(f, "{}", rule)?;
        write!(f, "{}", self.automatic)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Hint: {}", self.hint)?;
        write!(f, "{}", self.hinted)?;
        writeln!(f, "{}", rule)?;
        if let Some(ratio) = self.time_ratio() {
            writeln!(f, "Hinted/Automatic Time: {:.2}x", ratio)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(used_hint: bool, time: f64, index: Option<&str>) -> BenchmarkResult {
        BenchmarkResult {
            used_hint,
            mean_works: 1187.0,
            mean_n_returned: 1101.0,
            mean_time_millis: time,
            index_name: index.map(str::to_string),
            plan_cache_key: None,
            sample_count: 10,
        }
    }

    #[test]
    fn test_report_lines() {
        let text = result(false, 14.5, Some("countries_1_rated_1_released_1")).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Used Hint: No",
                "Works: 1187",
                "nReturned: 1101",
                "TimeMillis: 14.5",
                "Index Name: countries_1_rated_1_released_1",
                "Plan Cache Key: none",
            ]
        );
    }

    #[test]
    fn test_comparison_ratio() {
        let comparison = Comparison {
            run_id: Uuid::new_v4(),
            automatic: result(false, 10.0, Some("a_1")),
            hinted: result(true, 25.0, Some("a_1")),
            hint: HintSpec::new().ascending("a"),
            finished_at: Utc::now(),
        };

        assert_eq!(comparison.time_ratio(), Some(2.5));
        assert!(comparison.same_index());

        let report = comparison.to_string();
        assert!(report.contains("Used Hint: Yes"));
        assert!(report.contains("Hint: a:1"));
        assert!(report.contains("Hinted/Automatic Time: 2.50x"));
    }

    #[test]
    fn test_ratio_undefined_for_zero_time() {
        let comparison = Comparison {
            run_id: Uuid::new_v4(),
            automatic: result(false, 0.0, None),
            hinted: result(true, 3.0, Some("COLLSCAN")),
            hint: HintSpec::new().ascending("a"),
            finished_at: Utc::now(),
        };

        assert_eq!(comparison.time_ratio(), None);
        assert!(!comparison.same_index());
    }
}
