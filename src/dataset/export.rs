use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::{rank_sites, Snapshot};
use crate::model::{AssetId, NodeId};
use crate::scoring::Weights;

/// A scored node as written by `export`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedNode {
    pub rank: usize,
    pub id: NodeId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<String>,
    pub state: Option<String>,
    pub composite_score: f64,
    pub clean_gen: f64,
    pub transmission_headroom: f64,
    pub reliability: f64,
    pub nearby_clean_capacity_mw: f64,
    pub contributors: Vec<AssetId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportFile {
    pub generated_at: DateTime<Utc>,
    pub snapshot_created_at: DateTime<Utc>,
    pub weights: Weights,
    pub clean_gen_factor: f64,
    pub transmission_factor: f64,
    pub nodes: Vec<ExportedNode>,
}

/// Write every node of `snapshot`, in ranking order under `weights`, to
/// `path` as pretty JSON. The file is replaced atomically.
///
/// Returns the number of nodes written.
pub fn export_scored_nodes(path: &Path, snapshot: &Snapshot, weights: &Weights) -> Result<usize> {
    let ranked = rank_sites(snapshot.nodes(), weights)?;

    let mut nodes = Vec::with_capacity(ranked.len());
    for (idx, site) in ranked.into_iter().enumerate() {
        let node = snapshot.node(site.node_id)?;
        nodes.push(ExportedNode {
            rank: idx + 1,
            id: node.id,
            name: node.name.clone(),
            latitude: node.coordinates.latitude,
            longitude: node.coordinates.longitude,
            region: node.region.clone(),
            state: node.state.clone(),
            composite_score: site.composite_score,
            clean_gen: node.scores.clean_gen,
            transmission_headroom: node.scores.transmission_headroom,
            reliability: node.scores.reliability,
            nearby_clean_capacity_mw: node.clean.nearby_clean_capacity_mw,
            contributors: node.clean.contributors.clone(),
        });
    }

    let factors = snapshot.factors();
    let export = ExportFile {
        generated_at: Utc::now(),
        snapshot_created_at: snapshot.created_at(),
        weights: *weights,
        clean_gen_factor: factors.clean_gen,
        transmission_factor: factors.transmission,
        nodes,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create export directory at {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, &export).context("Failed to serialize scored nodes")?;
    file.commit()
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    Ok(export.nodes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, Coordinates, FuelCategory, NodeSite};
    use crate::scoring::ScoringConfig;
    use std::env;
    use std::fs::File;

    #[test]
    fn test_export_roundtrip() {
        let sites = vec![
            NodeSite::new(1, "Low", Coordinates::new(40.0, -100.0), 20.0),
            NodeSite::new(2, "High", Coordinates::new(40.1, -100.0), 95.0),
        ];
        let assets = vec![Asset::new(5, "Wind", Coordinates::new(40.05, -100.0), 300.0, FuelCategory::Wind)];
        let snapshot = Snapshot::build(sites, assets, &ScoringConfig::default()).unwrap();

        let path = env::temp_dir().join("grid_siting_test_export").join("scored.json");
        let _ = fs::remove_file(&path);

        let written = export_scored_nodes(&path, &snapshot, &Weights::default()).unwrap();
        assert_eq!(written, 2);

        let parsed: ExportFile = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(parsed.nodes[0].id, 2);
        assert_eq!(parsed.nodes[0].rank, 1);
        assert_eq!(parsed.nodes[1].contributors, vec![5]);
        assert_eq!(parsed.clean_gen_factor, snapshot.factors().clean_gen);
        assert_eq!(parsed.transmission_factor, snapshot.factors().transmission);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_export_rejects_invalid_weights() {
        let snapshot = Snapshot::build(vec![], vec![], &ScoringConfig::default()).unwrap();
        let path = env::temp_dir().join("grid_siting_test_export_bad.json");
        let bad = Weights {
            clean: 1.0,
            transmission: 1.0,
            reliability: 1.0,
        };
        assert!(export_scored_nodes(&path, &snapshot, &bad).is_err());
    }
}
