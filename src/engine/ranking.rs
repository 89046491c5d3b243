use std::cmp::Ordering;

use serde::Serialize;

use crate::error::Result;
use crate::model::{MetricScores, Node, NodeId};
use crate::scoring::engine::weighted_composite;
use crate::scoring::{round_display, Weights};

/// A node with its composite under one weight triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSite {
    pub node_id: NodeId,
    pub name: String,
    /// Rounded to one decimal for display
    pub composite_score: f64,
    /// Ordering key
    pub raw_composite: f64,
    pub scores: MetricScores,
    pub region: Option<String>,
    pub state: Option<String>,
}

impl RankedSite {
    fn from_node(node: &Node, weights: &Weights) -> Self {
        let raw_composite = weighted_composite(&node.scores, weights);
        Self {
            node_id: node.id,
            name: node.name.clone(),
            composite_score: round_display(raw_composite),
            raw_composite,
            scores: node.scores,
            region: node.region.clone(),
            state: node.state.clone(),
        }
    }
}

/// Composite descending, then node id ascending
fn ranking_order(a: &RankedSite, b: &RankedSite) -> Ordering {
    b.raw_composite
        .total_cmp(&a.raw_composite)
        .then_with(|| a.node_id.cmp(&b.node_id))
}

/// Rank every node by composite score under `weights`.
///
/// Uses the cached per-node metrics, so this is O(n log n) in node count.
/// Ordering is by the unrounded composite; nodes whose composites are equal
/// fall back to ascending node id.
pub fn rank_sites(nodes: &[Node], weights: &Weights) -> Result<Vec<RankedSite>> {
    weights.validate()?;

    let mut ranked: Vec<RankedSite> = nodes
        .iter()
        .map(|node| RankedSite::from_node(node, weights))
        .collect();
    ranked.sort_by(ranking_order);
    Ok(ranked)
}

/// Top `limit` nodes other than `target`, in ranking order
pub fn rank_alternatives(
    target: NodeId,
    nodes: &[Node],
    weights: &Weights,
    limit: usize,
) -> Result<Vec<RankedSite>> {
    weights.validate()?;

    let mut ranked: Vec<RankedSite> = nodes
        .iter()
        .filter(|node| node.id != target)
        .map(|node| RankedSite::from_node(node, weights))
        .collect();
    ranked.sort_by(ranking_order);
    ranked.truncate(limit);
    Ok(ranked)
}

/// Share of `nodes` whose composite `target` strictly beats, as a percentage
/// rounded to one decimal. An empty population ranks at 0.
pub fn percentile_rank(target: &Node, nodes: &[Node], weights: &Weights) -> Result<f64> {
    weights.validate()?;

    if nodes.is_empty() {
        return Ok(0.0);
    }

    let target_score = weighted_composite(&target.scores, weights);
    let beaten = nodes
        .iter()
        .filter(|node| target_score > weighted_composite(&node.scores, weights))
        .count();

    Ok(round_display(beaten as f64 / nodes.len() as f64 * 100.0))
}
