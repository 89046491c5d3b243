pub mod evaluation;
pub mod nearby;
pub mod ranking;
pub mod snapshot;

pub use evaluation::{compare, evaluation_notes, ComparisonEntry, ScenarioComparison, SiteEvaluation};
pub use nearby::{find_nearby, AssetSummary, NearbyAsset};
pub use ranking::{percentile_rank, rank_alternatives, rank_sites, RankedSite};
pub use snapshot::Snapshot;

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::error::{Result, SitingError};
use crate::model::{Asset, Coordinates, DemandProfile, MetricScores, NodeId, NodeSite};
use crate::scoring::aggregate::{raw_clean_gen, CleanGenRaw};
use crate::scoring::{
    adequacy_band, clean_gen_score, compute, reliability_estimate, transmission_score, validate_demand,
    AdequacyAdjustment, ScoreBreakdown, ScoringConfig, Weights,
};

/// How much context `evaluate_site` gathers around the composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationLimits {
    pub alternatives: usize,
    pub nearby_max_distance_km: f64,
    pub nearby_limit: usize,
}

impl Default for EvaluationLimits {
    fn default() -> Self {
        Self {
            alternatives: 5,
            nearby_max_distance_km: 200.0,
            nearby_limit: 20,
        }
    }
}

/// Owns the current scored population and answers queries against it.
///
/// `populate` and `reload` build a complete [`Snapshot`] off to the side and
/// then swap it in under the write lock. Queries clone the `Arc` under a
/// read lock and work on that, so a query sees exactly one population.
#[derive(Debug, Default)]
pub struct SitingEngine {
    config: ScoringConfig,
    snapshot: RwLock<Option<Arc<Snapshot>>>,
}

impl SitingEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            snapshot: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `sites` against `assets` and make the result current
    pub fn populate(&self, sites: Vec<NodeSite>, assets: Vec<Asset>) -> Result<Arc<Snapshot>> {
        let snapshot = Arc::new(Snapshot::build(sites, assets, &self.config)?);
        let mut current = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Full rebuild from a new population. Normalization factors are
    /// recomputed; nothing carries over from the previous snapshot. On
    /// failure the previous snapshot stays current.
    pub fn reload(&self, sites: Vec<NodeSite>, assets: Vec<Asset>) -> Result<Arc<Snapshot>> {
        let snapshot = self.populate(sites, assets)?;
        info!(created_at = %snapshot.created_at(), "reloaded population");
        Ok(snapshot)
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SitingError::EmptyPopulation)
    }

    /// Composite score of a registered node for `weights` and `demand`
    pub fn evaluate(&self, node_id: NodeId, weights: &Weights, demand: &DemandProfile) -> Result<ScoreBreakdown> {
        let snapshot = self.snapshot()?;
        let node = snapshot.node(node_id)?;
        self.score(&node.clean, node.scores, snapshot.factors().clean_gen, weights, demand)
    }

    /// Composite score of an arbitrary point against the current asset population.
    /// Reliability is estimated from the plants around the point.
    pub fn evaluate_at(
        &self,
        latitude: f64,
        longitude: f64,
        weights: &Weights,
        demand: &DemandProfile,
    ) -> Result<ScoreBreakdown> {
        let at = Coordinates::new(latitude, longitude);
        if !at.is_valid() {
            return Err(SitingError::validation(format!(
                "coordinates out of range: ({}, {})",
                latitude, longitude
            )));
        }

        let snapshot = self.snapshot()?;
        let factors = snapshot.factors();
        let clean = raw_clean_gen(&at, snapshot.clean_assets());
        let scores = MetricScores::new(
            clean_gen_score(&clean, factors.clean_gen, None),
            transmission_score(&at, snapshot.assets(), factors.transmission),
            reliability_estimate(&at, snapshot.assets()),
        );
        debug!(latitude, longitude, ?scores, "scored ad-hoc location");

        self.score(&clean, scores, factors.clean_gen, weights, demand)
    }

    /// Best `limit` nodes other than `node_id`
    pub fn alternatives(&self, node_id: NodeId, weights: &Weights, limit: usize) -> Result<Vec<RankedSite>> {
        let snapshot = self.snapshot()?;
        snapshot.node(node_id)?;
        rank_alternatives(node_id, snapshot.nodes(), weights, limit)
    }

    /// Every node in ranking order
    pub fn rank(&self, weights: &Weights) -> Result<Vec<RankedSite>> {
        let snapshot = self.snapshot()?;
        rank_sites(snapshot.nodes(), weights)
    }

    /// Assets around a point. Before the first populate there is nothing to find.
    pub fn nearby_assets(
        &self,
        latitude: f64,
        longitude: f64,
        max_distance_km: f64,
        limit: usize,
        clean_only: bool,
    ) -> Vec<NearbyAsset> {
        match self.snapshot() {
            Ok(snapshot) => find_nearby(
                &Coordinates::new(latitude, longitude),
                snapshot.assets(),
                max_distance_km,
                limit,
                clean_only,
            ),
            Err(_) => Vec::new(),
        }
    }

    /// Breakdown plus ranking context, nearby assets and notes for one node
    pub fn evaluate_site(
        &self,
        node_id: NodeId,
        weights: &Weights,
        demand: &DemandProfile,
        limits: &EvaluationLimits,
    ) -> Result<SiteEvaluation> {
        let snapshot = self.snapshot()?;
        let node = snapshot.node(node_id)?;

        let breakdown = self.score(&node.clean, node.scores, snapshot.factors().clean_gen, weights, demand)?;
        let percentile_rank = percentile_rank(node, snapshot.nodes(), weights)?;
        let alternatives = rank_alternatives(node_id, snapshot.nodes(), weights, limits.alternatives)?;
        let nearby_assets = find_nearby(
            &node.coordinates,
            snapshot.assets(),
            limits.nearby_max_distance_km,
            limits.nearby_limit,
            false,
        );
        let notes = evaluation_notes(&breakdown, node.clean.contributors.len());

        Ok(SiteEvaluation {
            node_id,
            name: node.name.clone(),
            coordinates: node.coordinates,
            region: node.region.clone(),
            state: node.state.clone(),
            demand: *demand,
            breakdown,
            percentile_rank,
            alternatives,
            nearby_assets,
            notes,
        })
    }

    /// Evaluate several nodes under one weight triple and demand and compare them
    pub fn compare(
        &self,
        node_ids: &[NodeId],
        weights: &Weights,
        demand: &DemandProfile,
        limits: &EvaluationLimits,
    ) -> Result<ScenarioComparison> {
        let evaluations = node_ids
            .iter()
            .map(|&id| self.evaluate_site(id, weights, demand, limits))
            .collect::<Result<Vec<_>>>()?;
        compare(&evaluations)
    }

    /// Validate the request, rescore clean generation from `clean` for the
    /// demand, then combine the metrics. `scores` holds the demand-free values.
    fn score(
        &self,
        clean: &CleanGenRaw,
        scores: MetricScores,
        clean_factor: f64,
        weights: &Weights,
        demand: &DemandProfile,
    ) -> Result<ScoreBreakdown> {
        weights.validate()?;
        validate_demand(demand, &self.config)?;

        let Some(demand_mw) = demand.size_mw() else {
            return compute(&scores, weights);
        };

        let adjusted = MetricScores {
            clean_gen: clean_gen_score(clean, clean_factor, Some(demand_mw)),
            ..scores
        };
        let mut breakdown = compute(&adjusted, weights)?;
        breakdown.adequacy = Some(AdequacyAdjustment {
            available_mw: clean.nearby_clean_capacity_mw,
            demand_mw,
            band: adequacy_band(clean.nearby_clean_capacity_mw / demand_mw),
            clean_gen_before: scores.clean_gen,
            clean_gen_after: adjusted.clean_gen,
        });
        Ok(breakdown)
    }
}
