use serde::{Deserialize, Serialize};

use super::validation::validate_weights;
use crate::error::Result;

/// Weight allocation across the three siting metrics.
///
/// Must sum to 1.0 within tolerance. Weights are validated before every
/// composite computation and never renormalized.
///
/// Example YAML:
/// ```yaml
/// weights:
///   clean: 0.4
///   transmission: 0.3
///   reliability: 0.3
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub clean: f64,
    pub transmission: f64,
    pub reliability: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            clean: 0.4,
            transmission: 0.3,
            reliability: 0.3,
        }
    }
}

impl Weights {
    /// Build a validated weight triple
    pub fn new(clean: f64, transmission: f64, reliability: f64) -> Result<Self> {
        validate_weights(clean, transmission, reliability)?;
        Ok(Self {
            clean,
            transmission,
            reliability,
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_weights(self.clean, self.transmission, self.reliability)
    }
}
