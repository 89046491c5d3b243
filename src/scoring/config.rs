use serde::{Deserialize, Serialize};

pub const DEFAULT_PERCENTILE: f64 = 0.9;
pub const DEFAULT_DEMAND_MIN_MW: f64 = 10.0;
pub const DEFAULT_DEMAND_MAX_MW: f64 = 2000.0;

/// Algorithm parameters for snapshot scoring.
///
/// Every field is optional; missing values fall back to the defaults above.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   percentile: 0.9
///   demand_min_mw: 10
///   demand_max_mw: 2000
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Percentile of raw node scores that maps to a score of 100 (default: 0.9)
    #[serde(default)]
    pub percentile: Option<f64>,

    /// Smallest accepted demand size in MW (default: 10)
    #[serde(default)]
    pub demand_min_mw: Option<f64>,

    /// Largest accepted demand size in MW (default: 2000)
    #[serde(default)]
    pub demand_max_mw: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            percentile: Some(DEFAULT_PERCENTILE),
            demand_min_mw: Some(DEFAULT_DEMAND_MIN_MW),
            demand_max_mw: Some(DEFAULT_DEMAND_MAX_MW),
        }
    }
}

impl ScoringConfig {
    pub fn percentile(&self) -> f64 {
        self.percentile.unwrap_or(DEFAULT_PERCENTILE)
    }

    /// Inclusive (min, max) demand size bounds in MW
    pub fn demand_bounds(&self) -> (f64, f64) {
        (
            self.demand_min_mw.unwrap_or(DEFAULT_DEMAND_MIN_MW),
            self.demand_max_mw.unwrap_or(DEFAULT_DEMAND_MAX_MW),
        )
    }
}
