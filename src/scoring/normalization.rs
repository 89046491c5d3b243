use serde::Serialize;
use tracing::{info, warn};

use super::aggregate::{raw_clean_gen, raw_transmission};
use crate::model::{Asset, Coordinates};

/// What to do when the percentile of raw scores is too small to scale by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    /// Percentile values below this are not trusted
    pub floor: f64,
    /// The population maximum replaces an untrusted percentile when it reaches this
    pub max_at_least: f64,
    /// Used when neither the percentile nor the maximum is usable
    pub default: f64,
}

pub const CLEAN_GEN_FALLBACK: FallbackPolicy = FallbackPolicy {
    floor: 1.0,
    max_at_least: f64::MIN_POSITIVE,
    default: 100.0,
};

/// 5000 MW of decayed capacity maps to 100 when the data gives no usable scale
pub const TRANSMISSION_FALLBACK: FallbackPolicy = FallbackPolicy {
    floor: 1000.0,
    max_at_least: 1000.0,
    default: 5000.0,
};

/// Scale factors derived from one node population and one asset population.
/// Recomputed with every snapshot; never carried across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizationFactors {
    pub clean_gen: f64,
    pub transmission: f64,
}

impl Default for NormalizationFactors {
    fn default() -> Self {
        Self {
            clean_gen: CLEAN_GEN_FALLBACK.default,
            transmission: TRANSMISSION_FALLBACK.default,
        }
    }
}

/// Value at `percentile` (0-1] of `values`, using the floor(n × p) index
/// clamped to the last element. Sorts `values` in place.
pub fn percentile_value(values: &mut [f64], percentile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let idx = ((values.len() as f64 * percentile).floor() as usize).min(values.len() - 1);
    Some(values[idx])
}

/// Turn per-node raw scores into a normalization factor
pub fn factor_from_raw_scores(mut raw_scores: Vec<f64>, percentile: f64, policy: &FallbackPolicy) -> f64 {
    let Some(value) = percentile_value(&mut raw_scores, percentile) else {
        return policy.default;
    };
    if value >= policy.floor {
        return value;
    }
    // Sorted above, so the maximum is the last element
    match raw_scores.last() {
        Some(&max) if max >= policy.max_at_least => max,
        _ => policy.default,
    }
}

/// Clean-generation normalization factor for `nodes` against `assets`.
///
/// Top-decile sites (at the default 0.9 percentile) land near 100, typical
/// sites around the middle of the range. Demand adequacy is not applied here.
pub fn estimate_normalization_factor(nodes: &[Coordinates], assets: &[Asset], percentile: f64) -> f64 {
    if nodes.is_empty() || assets.is_empty() {
        warn!("cannot estimate clean gen normalization with empty data, using default");
        return CLEAN_GEN_FALLBACK.default;
    }
    let raw: Vec<f64> = nodes.iter().map(|n| raw_clean_gen(n, assets).raw).collect();
    let factor = factor_from_raw_scores(raw, percentile, &CLEAN_GEN_FALLBACK);
    info!(factor, percentile, "estimated clean gen normalization factor");
    factor
}

/// Transmission normalization factor for `nodes` against every asset
pub fn estimate_transmission_normalization_factor(
    nodes: &[Coordinates],
    assets: &[Asset],
    percentile: f64,
) -> f64 {
    if nodes.is_empty() || assets.is_empty() {
        warn!("cannot estimate transmission normalization with empty data, using default");
        return TRANSMISSION_FALLBACK.default;
    }
    let raw: Vec<f64> = nodes.iter().map(|n| raw_transmission(n, assets)).collect();
    let factor = factor_from_raw_scores(raw, percentile, &TRANSMISSION_FALLBACK);
    info!(factor, percentile, "estimated transmission normalization factor");
    factor
}
