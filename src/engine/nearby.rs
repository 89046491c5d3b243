use serde::Serialize;

use crate::model::{Asset, AssetId, Coordinates, FuelCategory};

/// The parts of an asset a caller needs when listing what is nearby
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSummary {
    pub id: AssetId,
    pub name: String,
    pub coordinates: Coordinates,
    pub capacity_mw: f64,
    pub fuel_category: FuelCategory,
    pub clean: bool,
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            coordinates: asset.coordinates,
            capacity_mw: asset.capacity_mw,
            fuel_category: asset.fuel_category,
            clean: asset.is_clean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyAsset {
    pub asset: AssetSummary,
    pub distance_km: f64,
}

/// Assets within `max_distance_km` of `at`, closest first (ties by asset id),
/// at most `limit` of them. `clean_only` drops assets with a zero clean
/// multiplier. A non-positive radius, a zero limit or an empty population all
/// give an empty list.
pub fn find_nearby(
    at: &Coordinates,
    assets: &[Asset],
    max_distance_km: f64,
    limit: usize,
    clean_only: bool,
) -> Vec<NearbyAsset> {
    if max_distance_km.is_nan() || max_distance_km <= 0.0 || limit == 0 {
        return Vec::new();
    }

    let mut found: Vec<(f64, &Asset)> = assets
        .iter()
        .filter(|asset| !clean_only || asset.is_clean())
        .map(|asset| (at.distance_to(&asset.coordinates), asset))
        .filter(|(distance, _)| *distance <= max_distance_km)
        .collect();

    found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
    found.truncate(limit);

    found
        .into_iter()
        .map(|(distance_km, asset)| NearbyAsset {
            asset: AssetSummary::from(asset),
            distance_km,
        })
        .collect()
}
