use serde::Serialize;

/// One capacity-to-demand ratio band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdequacyBand {
    /// Inclusive lower bound on available / demand
    pub min_ratio: f64,
    pub factor: f64,
    pub label: &'static str,
}

/// Bands from best to worst. The first band whose lower bound the ratio
/// reaches wins; anything below the last band is a severe shortfall.
pub const ADEQUACY_BANDS: [AdequacyBand; 6] = [
    AdequacyBand { min_ratio: 3.0, factor: 1.20, label: "excellent surplus" },
    AdequacyBand { min_ratio: 2.0, factor: 1.10, label: "resilient surplus" },
    AdequacyBand { min_ratio: 1.5, factor: 1.00, label: "adequate with buffer" },
    AdequacyBand { min_ratio: 1.0, factor: 0.95, label: "adequate but tight" },
    AdequacyBand { min_ratio: 0.7, factor: 0.85, label: "moderate shortfall" },
    AdequacyBand { min_ratio: 0.5, factor: 0.70, label: "significant shortfall" },
];

pub const SEVERE_SHORTFALL: AdequacyBand = AdequacyBand {
    min_ratio: 0.0,
    factor: 0.50,
    label: "severe shortfall",
};

/// Band for a capacity ratio. NaN falls through to the severe band.
pub fn adequacy_band(ratio: f64) -> AdequacyBand {
    ADEQUACY_BANDS
        .iter()
        .find(|band| ratio >= band.min_ratio)
        .copied()
        .unwrap_or(SEVERE_SHORTFALL)
}

/// Multiplier for clean generation given nearby clean capacity and an
/// optional demand size. Absent or non-positive demand is neutral (1.0).
pub fn adequacy_factor(available_mw: f64, demand_mw: Option<f64>) -> f64 {
    match demand_mw {
        Some(demand) if demand > 0.0 => adequacy_band(available_mw / demand).factor,
        _ => 1.0,
    }
}
