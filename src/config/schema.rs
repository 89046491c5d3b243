use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::EvaluationLimits;
use crate::scoring::{ScoringConfig, Weights};

pub const DEFAULT_NEARBY_MAX_DISTANCE_KM: f64 = 200.0;
pub const DEFAULT_NEARBY_LIMIT: usize = 20;
pub const DEFAULT_ALTERNATIVES_LIMIT: usize = 5;

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// datasets:
///   assets: /data/assets.json
///   nodes: /data/nodes.json
/// weights:
///   clean: 0.4
///   transmission: 0.3
///   reliability: 0.3
/// scoring:
///   percentile: 0.9
/// nearby:
///   max_distance_km: 200
///   limit: 20
/// alternatives_limit: 5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub datasets: DatasetConfig,

    /// Default weights when none are given on the command line
    #[serde(default)]
    pub weights: Option<Weights>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub nearby: Option<NearbyConfig>,

    /// Alternatives listed with each evaluation (default: 5)
    #[serde(default)]
    pub alternatives_limit: Option<usize>,
}

impl Config {
    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn nearby(&self) -> NearbyConfig {
        self.nearby.clone().unwrap_or_default()
    }

    pub fn alternatives_limit(&self) -> usize {
        self.alternatives_limit.unwrap_or(DEFAULT_ALTERNATIVES_LIMIT)
    }

    pub fn evaluation_limits(&self) -> EvaluationLimits {
        let nearby = self.nearby();
        EvaluationLimits {
            alternatives: self.alternatives_limit(),
            nearby_max_distance_km: nearby.max_distance_km(),
            nearby_limit: nearby.limit(),
        }
    }
}

/// JSON dataset locations
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    #[serde(default)]
    pub assets: Option<PathBuf>,
    #[serde(default)]
    pub nodes: Option<PathBuf>,
}

/// Defaults for nearby-asset listings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NearbyConfig {
    /// Search radius in km (default: 200)
    #[serde(default)]
    pub max_distance_km: Option<f64>,

    /// Most assets listed (default: 20)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            max_distance_km: Some(DEFAULT_NEARBY_MAX_DISTANCE_KM),
            limit: Some(DEFAULT_NEARBY_LIMIT),
        }
    }
}

impl NearbyConfig {
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km.unwrap_or(DEFAULT_NEARBY_MAX_DISTANCE_KM)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_NEARBY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
datasets:
  assets: /data/assets.json
  nodes: /data/nodes.json
weights:
  clean: 0.5
  transmission: 0.3
  reliability: 0.2
scoring:
  percentile: 0.8
  demand_max_mw: 1500
nearby:
  max_distance_km: 150
  limit: 10
alternatives_limit: 3
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.datasets.assets, Some(PathBuf::from("/data/assets.json")));
        assert_eq!(config.weights().clean, 0.5);
        assert_eq!(config.scoring().percentile(), 0.8);
        assert_eq!(config.scoring().demand_bounds(), (10.0, 1500.0));
        assert_eq!(config.nearby().max_distance_km(), 150.0);
        assert_eq!(config.evaluation_limits().alternatives, 3);
        assert_eq!(config.evaluation_limits().nearby_limit, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config.weights(), Weights::default());
        assert_eq!(config.scoring(), ScoringConfig::default());
        assert_eq!(config.evaluation_limits(), EvaluationLimits::default());
        assert!(config.datasets.nodes.is_none());
    }

    #[test]
    fn test_partial_nearby() {
        let config: Config = serde_saphyr::from_str("nearby:\n  limit: 3\n").unwrap();
        assert_eq!(config.nearby().limit(), 3);
        assert_eq!(config.nearby().max_distance_km(), DEFAULT_NEARBY_MAX_DISTANCE_KM);
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }
}
