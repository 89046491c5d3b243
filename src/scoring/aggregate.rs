use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::adequacy::adequacy_factor;
use super::decay::{proximity_decay, transmission_decay, PROXIMITY_CUTOFF_KM};
use crate::model::{Asset, AssetId, Coordinates};

/// Clean capacity inside this radius counts toward demand adequacy
pub const ADEQUACY_RADIUS_KM: f64 = PROXIMITY_CUTOFF_KM;

/// Plants inside this radius count toward the reliability estimate
pub const RELIABILITY_RADIUS_KM: f64 = 200.0;

/// Reliability of a point with no asset data at all
pub const NEUTRAL_RELIABILITY: f64 = 50.0;

/// Reliability of a point with no plants inside the reliability radius
pub const ISOLATED_RELIABILITY: f64 = 30.0;

/// Un-normalized clean generation sums for one location
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanGenRaw {
    /// Σ capacity × clean multiplier × proximity decay
    pub raw: f64,
    /// Σ capacity × clean multiplier inside [`ADEQUACY_RADIUS_KM`]
    pub nearby_clean_capacity_mw: f64,
    /// Clean assets with a non-zero contribution, closest first
    pub contributors: Vec<AssetId>,
}

/// Sum clean-generation contributions of `assets` around `at`.
/// Assets with a zero clean multiplier are skipped.
pub fn raw_clean_gen<'a>(at: &Coordinates, assets: impl IntoIterator<Item = &'a Asset>) -> CleanGenRaw {
    let mut raw = 0.0;
    let mut nearby_clean_capacity_mw = 0.0;
    let mut contributing: Vec<(f64, AssetId)> = Vec::new();

    for asset in assets.into_iter().filter(|a| a.is_clean()) {
        let distance = at.distance_to(&asset.coordinates);
        let proximity = proximity_decay(distance);
        let clean_mw = asset.capacity_mw * asset.clean_multiplier;

        raw += clean_mw * proximity;
        if distance < ADEQUACY_RADIUS_KM {
            nearby_clean_capacity_mw += clean_mw;
        }
        if proximity > 0.0 && clean_mw > 0.0 {
            contributing.push((distance, asset.id));
        }
    }

    contributing.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    CleanGenRaw {
        raw,
        nearby_clean_capacity_mw,
        contributors: contributing.into_iter().map(|(_, id)| id).collect(),
    }
}

/// Sum transmission contributions of every asset around `at`, whatever its fuel.
/// Large conventional plants sit on the highest-voltage lines, so they count too.
pub fn raw_transmission<'a>(at: &Coordinates, assets: impl IntoIterator<Item = &'a Asset>) -> f64 {
    let mut raw = 0.0;
    let mut considered = 0usize;

    for asset in assets {
        let distance = at.distance_to(&asset.coordinates);
        let decay = transmission_decay(distance, asset.capacity_mw);
        if decay > 0.0 {
            raw += asset.capacity_mw * decay;
            considered += 1;
        }
    }

    debug!(
        lat = at.latitude,
        lon = at.longitude,
        considered,
        raw,
        "transmission aggregation"
    );
    raw
}

/// Rescale a raw sum to 0-100 against a normalization factor
pub fn normalize(raw: f64, norm_factor: f64) -> f64 {
    if norm_factor.is_nan() || norm_factor <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    (raw / norm_factor * 100.0).clamp(0.0, 100.0)
}

/// Apply the demand adequacy factor to an already-normalized clean score
pub fn adjust_for_demand(base: f64, nearby_clean_capacity_mw: f64, demand_mw: Option<f64>) -> f64 {
    (base * adequacy_factor(nearby_clean_capacity_mw, demand_mw)).clamp(0.0, 100.0)
}

/// Clean generation score (0-100) from the sums around one location.
///
/// Normalizes `sums.raw` against `norm_factor`, then scales by the adequacy
/// factor of the nearby clean capacity for `demand_mw`. Without demand the
/// result is the plain normalized score.
pub fn clean_gen_score(sums: &CleanGenRaw, norm_factor: f64, demand_mw: Option<f64>) -> f64 {
    let base = normalize(sums.raw, norm_factor);
    let adjusted = adjust_for_demand(base, sums.nearby_clean_capacity_mw, demand_mw);

    if demand_mw.is_some() {
        debug!(
            available_mw = sums.nearby_clean_capacity_mw,
            demand_mw,
            base,
            adjusted,
            "clean gen capacity adequacy"
        );
    }
    adjusted
}

/// Transmission headroom score (0-100) at `at`, using all assets
pub fn transmission_score(at: &Coordinates, all_assets: &[Asset], norm_factor: f64) -> f64 {
    normalize(raw_transmission(at, all_assets), norm_factor)
}

/// Estimate grid reliability (0-100) for a location that is not a registered
/// node, from the plants within [`RELIABILITY_RADIUS_KM`].
///
/// Blends plant count (20 plants = full credit, 40%), fuel diversity
/// (5 categories = full credit, 30%) and total capacity (10 GW = full credit, 30%).
pub fn reliability_estimate(at: &Coordinates, assets: &[Asset]) -> f64 {
    if assets.is_empty() {
        return NEUTRAL_RELIABILITY;
    }

    let nearby: Vec<&Asset> = assets
        .iter()
        .filter(|a| at.distance_to(&a.coordinates) <= RELIABILITY_RADIUS_KM)
        .collect();

    if nearby.is_empty() {
        return ISOLATED_RELIABILITY;
    }

    let count_score = (nearby.len() as f64 / 20.0 * 100.0).min(100.0);
    let categories: HashSet<_> = nearby.iter().map(|a| a.fuel_category).collect();
    let diversity_score = (categories.len() as f64 / 5.0 * 100.0).min(100.0);
    let total_mw: f64 = nearby.iter().map(|a| a.capacity_mw).sum();
    let capacity_score = (total_mw / 10_000.0 * 100.0).min(100.0);

    (count_score * 0.4 + diversity_score * 0.3 + capacity_score * 0.3).clamp(0.0, 100.0)
}
