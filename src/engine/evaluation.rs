use serde::Serialize;

use super::nearby::NearbyAsset;
use super::ranking::RankedSite;
use crate::error::{Result, SitingError};
use crate::model::{Coordinates, DemandProfile, NodeId};
use crate::scoring::{round_display, Metric, ScoreBreakdown};

/// Full assessment of one registered node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteEvaluation {
    pub node_id: NodeId,
    pub name: String,
    pub coordinates: Coordinates,
    pub region: Option<String>,
    pub state: Option<String>,
    pub demand: DemandProfile,
    pub breakdown: ScoreBreakdown,
    /// Share of all nodes this one beats, 0-100
    pub percentile_rank: f64,
    pub alternatives: Vec<RankedSite>,
    pub nearby_assets: Vec<NearbyAsset>,
    pub notes: Vec<String>,
}

/// Score thresholds (excellent-at, concern-below) per metric
const CLEAN_GEN_THRESHOLDS: (f64, f64) = (80.0, 50.0);
const TRANSMISSION_THRESHOLDS: (f64, f64) = (80.0, 40.0);
const RELIABILITY_THRESHOLDS: (f64, f64) = (80.0, 60.0);

/// Human-readable remarks on a breakdown: an overall verdict, then one
/// remark for each metric that is notably strong or weak.
pub fn evaluation_notes(breakdown: &ScoreBreakdown, contributor_count: usize) -> Vec<String> {
    let mut notes = Vec::new();

    let overall = match breakdown.composite_score {
        s if s >= 80.0 => "Excellent overall siting location",
        s if s >= 70.0 => "Very good siting location with minor trade-offs",
        s if s >= 60.0 => "Good siting location suitable for most applications",
        s if s >= 50.0 => "Moderate siting location with some constraints",
        _ => "Challenging siting location requiring mitigation",
    };
    notes.push(overall.to_string());

    let remarks = [
        (
            Metric::CleanGen,
            CLEAN_GEN_THRESHOLDS,
            "Outstanding clean energy resources nearby",
            "Limited clean energy access may require additional renewables",
        ),
        (
            Metric::Transmission,
            TRANSMISSION_THRESHOLDS,
            "Excellent transmission capacity available",
            "Transmission upgrades likely required",
        ),
        (
            Metric::Reliability,
            RELIABILITY_THRESHOLDS,
            "Highly reliable grid infrastructure",
            "Grid reliability concerns should be assessed",
        ),
    ];

    for (metric, (strong_at, weak_below), strong, weak) in remarks {
        let score = breakdown.contribution(metric).score;
        if score >= strong_at {
            notes.push(strong.to_string());
        } else if score < weak_below {
            notes.push(weak.to_string());
        }
    }

    if let Some(adequacy) = &breakdown.adequacy {
        notes.push(format!(
            "{:.0} MW of clean capacity within reach for {:.0} MW demand ({})",
            adequacy.available_mw, adequacy.demand_mw, adequacy.band.label
        ));
    }

    if contributor_count >= 2 {
        notes.push(format!("{} nearby clean energy projects identified", contributor_count));
    }

    notes
}

/// One site's place in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub node_id: NodeId,
    pub name: String,
    pub composite_score: f64,
    /// Composite minus the best composite, rounded to one decimal (<= 0)
    pub delta_from_best: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub best_node_id: NodeId,
    /// (lowest, highest) composite among the compared sites
    pub score_range: (f64, f64),
    /// Same order as the evaluations passed in
    pub entries: Vec<ComparisonEntry>,
}

/// Compare evaluations made under the same weights and demand.
/// The best site is the highest composite; equal composites go to the lower node id.
pub fn compare(evaluations: &[SiteEvaluation]) -> Result<ScenarioComparison> {
    let best = evaluations
        .iter()
        .max_by(|a, b| {
            a.breakdown
                .raw_composite
                .total_cmp(&b.breakdown.raw_composite)
                .then_with(|| b.node_id.cmp(&a.node_id))
        })
        .ok_or_else(|| SitingError::validation("at least one site is required for a comparison"))?;

    let best_score = best.breakdown.composite_score;
    let (low, high) = evaluations.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
        (lo.min(e.breakdown.composite_score), hi.max(e.breakdown.composite_score))
    });

    let entries = evaluations
        .iter()
        .map(|e| ComparisonEntry {
            node_id: e.node_id,
            name: e.name.clone(),
            composite_score: e.breakdown.composite_score,
            delta_from_best: round_display(e.breakdown.composite_score - best_score),
        })
        .collect();

    Ok(ScenarioComparison {
        best_node_id: best.node_id,
        score_range: (low, high),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricScores;
    use crate::scoring::{adequacy_band, compute, AdequacyAdjustment, Weights};

    fn breakdown(clean: f64, transmission: f64, reliability: f64) -> ScoreBreakdown {
        compute(&MetricScores::new(clean, transmission, reliability), &Weights::default()).unwrap()
    }

    fn evaluation(node_id: NodeId, score: f64) -> SiteEvaluation {
        SiteEvaluation {
            node_id,
            name: format!("Site {}", node_id),
            coordinates: Coordinates::new(40.0, -100.0),
            region: None,
            state: None,
            demand: DemandProfile::NoDemand,
            breakdown: breakdown(score, score, score),
            percentile_rank: 0.0,
            alternatives: vec![],
            nearby_assets: vec![],
            notes: vec![],
        }
    }

    #[test]
    fn test_notes_for_strong_site() {
        let notes = evaluation_notes(&breakdown(90.0, 85.0, 95.0), 3);
        assert_eq!(notes[0], "Excellent overall siting location");
        assert!(notes.contains(&"Outstanding clean energy resources nearby".to_string()));
        assert!(notes.contains(&"Excellent transmission capacity available".to_string()));
        assert!(notes.contains(&"Highly reliable grid infrastructure".to_string()));
        assert!(notes.contains(&"3 nearby clean energy projects identified".to_string()));
    }

    #[test]
    fn test_notes_for_weak_site() {
        let notes = evaluation_notes(&breakdown(20.0, 30.0, 40.0), 0);
        assert_eq!(
            notes,
            vec![
                "Challenging siting location requiring mitigation",
                "Limited clean energy access may require additional renewables",
                "Transmission upgrades likely required",
                "Grid reliability concerns should be assessed",
            ]
        );
    }

    #[test]
    fn test_middling_metrics_add_no_remark() {
        let notes = evaluation_notes(&breakdown(65.0, 65.0, 65.0), 1);
        assert_eq!(notes, vec!["Good siting location suitable for most applications"]);
    }

    #[test]
    fn test_notes_mention_adequacy() {
        let mut result = breakdown(60.0, 60.0, 70.0);
        result.adequacy = Some(AdequacyAdjustment {
            available_mw: 450.0,
            demand_mw: 150.0,
            band: adequacy_band(3.0),
            clean_gen_before: 50.0,
            clean_gen_after: 60.0,
        });
        let notes = evaluation_notes(&result, 0);
        assert!(notes.iter().any(|n| n.contains("450 MW") && n.contains("excellent surplus")));
    }

    #[test]
    fn test_compare() {
        let evaluations = vec![evaluation(1, 60.0), evaluation(2, 75.5), evaluation(3, 50.0)];
        let comparison = compare(&evaluations).unwrap();
        assert_eq!(comparison.best_node_id, 2);
        assert_eq!(comparison.score_range, (50.0, 75.5));
        let deltas: Vec<f64> = comparison.entries.iter().map(|e| e.delta_from_best).collect();
        assert_eq!(deltas, vec![-15.5, 0.0, -25.5]);
    }

    #[test]
    fn test_compare_tie_goes_to_lower_id() {
        let evaluations = vec![evaluation(8, 70.0), evaluation(4, 70.0)];
        assert_eq!(compare(&evaluations).unwrap().best_node_id, 4);
    }

    #[test]
    fn test_compare_empty() {
        assert!(matches!(compare(&[]), Err(SitingError::Validation(_))));
    }
}
