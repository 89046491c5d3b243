use serde::Serialize;

use super::adequacy::AdequacyBand;
use super::weights::Weights;
use crate::error::Result;
use crate::model::MetricScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CleanGen,
    Transmission,
    Reliability,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::CleanGen => "Clean generation",
            Metric::Transmission => "Transmission headroom",
            Metric::Reliability => "Reliability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricContribution {
    pub metric: Metric,
    pub score: f64,        // Metric score, 0-100
    pub weight: f64,       // Weight applied
    pub contribution: f64, // score × weight, unrounded
}

/// How demand adequacy changed clean generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdequacyAdjustment {
    pub available_mw: f64,
    pub demand_mw: f64,
    pub band: AdequacyBand,
    pub clean_gen_before: f64,
    pub clean_gen_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Composite rounded to one decimal, for display
    pub composite_score: f64,
    /// Full precision composite; ranking and tie-breaking use this value
    pub raw_composite: f64,
    pub contributions: [MetricContribution; 3],
    pub weights: Weights,
    pub adequacy: Option<AdequacyAdjustment>,
}

impl ScoreBreakdown {
    pub fn contribution(&self, metric: Metric) -> &MetricContribution {
        match metric {
            Metric::CleanGen => &self.contributions[0],
            Metric::Transmission => &self.contributions[1],
            Metric::Reliability => &self.contributions[2],
        }
    }
}

/// Round to one decimal place for display
pub fn round_display(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted sum of the three metrics. Callers validate `weights` first.
pub(crate) fn weighted_composite(scores: &MetricScores, weights: &Weights) -> f64 {
    scores.clean_gen * weights.clean
        + scores.transmission_headroom * weights.transmission
        + scores.reliability * weights.reliability
}

/// Composite siting score for a set of metric scores.
///
/// Validates the weights, then combines
/// `clean_gen × w_clean + transmission × w_transmission + reliability × w_reliability`.
pub fn compute(scores: &MetricScores, weights: &Weights) -> Result<ScoreBreakdown> {
    weights.validate()?;

    let contributions = [
        MetricContribution {
            metric: Metric::CleanGen,
            score: scores.clean_gen,
            weight: weights.clean,
            contribution: scores.clean_gen * weights.clean,
        },
        MetricContribution {
            metric: Metric::Transmission,
            score: scores.transmission_headroom,
            weight: weights.transmission,
            contribution: scores.transmission_headroom * weights.transmission,
        },
        MetricContribution {
            metric: Metric::Reliability,
            score: scores.reliability,
            weight: weights.reliability,
            contribution: scores.reliability * weights.reliability,
        },
    ];

    let raw_composite = weighted_composite(scores, weights);

    Ok(ScoreBreakdown {
        composite_score: round_display(raw_composite),
        raw_composite,
        contributions,
        weights: *weights,
        adequacy: None,
    })
}
