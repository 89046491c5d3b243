use serde::{Deserialize, Serialize};

use super::asset::Coordinates;
use crate::scoring::aggregate::CleanGenRaw;

pub type NodeId = u32;

/// Candidate site as produced by the node generator, before any scoring.
///
/// Reliability comes from the generator; the other two metrics are derived
/// from the asset population when a snapshot is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSite {
    pub id: NodeId,
    pub name: String,
    pub coordinates: Coordinates,
    pub reliability: f64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl NodeSite {
    pub fn new(id: NodeId, name: impl Into<String>, coordinates: Coordinates, reliability: f64) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates,
            reliability,
            region: None,
            state: None,
        }
    }
}

/// The three 0-100 siting metrics of a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    pub clean_gen: f64,
    pub transmission_headroom: f64,
    pub reliability: f64,
}

impl MetricScores {
    pub fn new(clean_gen: f64, transmission_headroom: f64, reliability: f64) -> Self {
        Self {
            clean_gen,
            transmission_headroom,
            reliability,
        }
    }
}

/// A scored candidate site held by a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub coordinates: Coordinates,
    pub region: Option<String>,
    pub state: Option<String>,
    /// Scores without any demand adjustment
    pub scores: MetricScores,
    /// Clean generation sums the `clean_gen` score was normalized from.
    /// Demand adequacy is applied to these per request.
    pub clean: CleanGenRaw,
}
