use std::collections::HashMap;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{Result, SitingError};
use crate::model::{Asset, Coordinates, MetricScores, Node, NodeId, NodeSite};
use crate::scoring::aggregate::{clean_gen_score, raw_clean_gen, transmission_score};
use crate::scoring::normalization::{
    estimate_normalization_factor, estimate_transmission_normalization_factor, NormalizationFactors,
};
use crate::scoring::ScoringConfig;

/// Population problems listed before the rest are summarised as a count
const MAX_REPORTED_PROBLEMS: usize = 10;

/// One immutable, fully scored population.
///
/// Built in two passes: raw sums over every node give the normalization
/// factors, then each node is rescaled against them. Never mutated after
/// construction; a reload builds a new one.
#[derive(Debug)]
pub struct Snapshot {
    assets: Vec<Asset>,
    clean_assets: Vec<Asset>,
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    factors: NormalizationFactors,
    created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Validate `sites` and `assets`, then score every site
    pub fn build(sites: Vec<NodeSite>, assets: Vec<Asset>, config: &ScoringConfig) -> Result<Self> {
        validate_population(&sites, &assets)?;

        let percentile = config.percentile();
        let clean_assets: Vec<Asset> = assets.iter().filter(|a| a.is_clean()).cloned().collect();
        let coordinates: Vec<Coordinates> = sites.iter().map(|s| s.coordinates).collect();

        let factors = NormalizationFactors {
            clean_gen: estimate_normalization_factor(&coordinates, &clean_assets, percentile),
            transmission: estimate_transmission_normalization_factor(&coordinates, &assets, percentile),
        };

        let nodes: Vec<Node> = sites
            .into_iter()
            .map(|site| score_site(site, &assets, &clean_assets, &factors))
            .collect();

        let index = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id, position))
            .collect();

        info!(
            nodes = nodes.len(),
            assets = assets.len(),
            clean_assets = clean_assets.len(),
            clean_factor = factors.clean_gen,
            transmission_factor = factors.transmission,
            "built scoring snapshot"
        );

        Ok(Self {
            assets,
            clean_assets,
            nodes,
            index,
            factors,
            created_at: Utc::now(),
        })
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn clean_assets(&self) -> &[Asset] {
        &self.clean_assets
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn factors(&self) -> NormalizationFactors {
        self.factors
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.index
            .get(&id)
            .map(|&position| &self.nodes[position])
            .ok_or(SitingError::NotFound(id))
    }
}

fn score_site(
    site: NodeSite,
    assets: &[Asset],
    clean_assets: &[Asset],
    factors: &NormalizationFactors,
) -> Node {
    let clean = raw_clean_gen(&site.coordinates, clean_assets);
    let clean_gen = clean_gen_score(&clean, factors.clean_gen, None);
    let transmission_headroom = transmission_score(&site.coordinates, assets, factors.transmission);

    debug!(
        node = site.id,
        clean_gen,
        transmission_headroom,
        contributors = clean.contributors.len(),
        "scored node"
    );

    Node {
        id: site.id,
        name: site.name,
        coordinates: site.coordinates,
        region: site.region,
        state: site.state,
        scores: MetricScores::new(clean_gen, transmission_headroom, site.reliability),
        clean,
    }
}

/// Reject populations the aggregators cannot score. Every problem found is
/// reported in one validation error.
fn validate_population(sites: &[NodeSite], assets: &[Asset]) -> Result<()> {
    let mut errors = Vec::new();

    for asset in assets {
        if !asset.capacity_mw.is_finite() || asset.capacity_mw < 0.0 {
            errors.push(format!(
                "asset {}: capacity must be a non-negative number, got {}",
                asset.id, asset.capacity_mw
            ));
        }
        if !(0.0..=1.0).contains(&asset.clean_multiplier) {
            errors.push(format!(
                "asset {}: clean multiplier must be between 0 and 1, got {}",
                asset.id, asset.clean_multiplier
            ));
        }
        if !asset.coordinates.is_valid() {
            errors.push(format!("asset {}: invalid coordinates", asset.id));
        }
    }

    let mut seen = HashSet::new();
    for site in sites {
        if !seen.insert(site.id) {
            errors.push(format!("node {}: duplicate id", site.id));
        }
        if !site.coordinates.is_valid() {
            errors.push(format!("node {}: invalid coordinates", site.id));
        }
        if !(0.0..=100.0).contains(&site.reliability) {
            errors.push(format!(
                "node {}: reliability must be between 0 and 100, got {}",
                site.id, site.reliability
            ));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    let total = errors.len();
    let mut reason = errors
        .into_iter()
        .take(MAX_REPORTED_PROBLEMS)
        .collect::<Vec<_>>()
        .join("; ");
    if total > MAX_REPORTED_PROBLEMS {
        reason.push_str(&format!(" (and {} more)", total - MAX_REPORTED_PROBLEMS));
    }
    Err(SitingError::validation(reason))
}
