mod export;

pub use export::{export_scored_nodes, ExportFile, ExportedNode};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::model::{Asset, AssetId, Coordinates, FuelCategory, NodeId, NodeSite};

/// One generating asset as stored in the assets JSON array
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AssetRecord {
    pub id: AssetId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity_mw: f64,
    pub fuel_category: FuelCategory,
    /// Falls back to the category default when absent
    #[serde(default)]
    pub clean_multiplier: Option<f64>,
}

impl TryFrom<AssetRecord> for Asset {
    type Error = anyhow::Error;

    fn try_from(record: AssetRecord) -> Result<Self> {
        if !record.capacity_mw.is_finite() || record.capacity_mw < 0.0 {
            bail!("capacity_mw must be a non-negative number, got {}", record.capacity_mw);
        }
        let coordinates = Coordinates::new(record.latitude, record.longitude);
        if !coordinates.is_valid() {
            bail!("invalid coordinates ({}, {})", record.latitude, record.longitude);
        }

        let asset = Asset::new(record.id, record.name, coordinates, record.capacity_mw, record.fuel_category);
        match record.clean_multiplier {
            Some(m) if !(0.0..=1.0).contains(&m) => {
                bail!("clean_multiplier must be between 0 and 1, got {}", m)
            }
            Some(m) => Ok(asset.with_clean_multiplier(m)),
            None => Ok(asset),
        }
    }
}

/// One candidate site as stored in the nodes JSON array
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reliability: f64,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

impl TryFrom<NodeRecord> for NodeSite {
    type Error = anyhow::Error;

    fn try_from(record: NodeRecord) -> Result<Self> {
        let coordinates = Coordinates::new(record.latitude, record.longitude);
        if !coordinates.is_valid() {
            bail!("invalid coordinates ({}, {})", record.latitude, record.longitude);
        }
        if !(0.0..=100.0).contains(&record.reliability) {
            bail!("reliability must be between 0 and 100, got {}", record.reliability);
        }

        Ok(NodeSite {
            id: record.id,
            name: record.name,
            coordinates,
            reliability: record.reliability,
            region: record.region,
            state: record.state,
        })
    }
}

fn read_records<T: for<'de> Deserialize<'de>>(path: &Path, kind: &str) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} dataset at {}", kind, path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {} dataset at {}", kind, path.display()))
}

/// Load and check the asset population from a JSON array
pub fn load_assets(path: &Path) -> Result<Vec<Asset>> {
    read_records::<AssetRecord>(path, "asset")?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let id = record.id;
            Asset::try_from(record)
                .with_context(|| format!("Invalid asset {} (entry {}) in {}", id, idx, path.display()))
        })
        .collect()
}

/// Load and check the candidate sites from a JSON array
pub fn load_nodes(path: &Path) -> Result<Vec<NodeSite>> {
    read_records::<NodeRecord>(path, "node")?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let id = record.id;
            NodeSite::try_from(record)
                .with_context(|| format!("Invalid node {} (entry {}) in {}", id, idx, path.display()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_load_assets() {
        let path = env::temp_dir().join("grid_siting_test_assets.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "name": "Sun Field", "latitude": 35.0, "longitude": -111.0, "capacity_mw": 400, "fuel_category": "SOLAR"},
                {"id": 2, "name": "Gas Plant", "latitude": 35.2, "longitude": -111.1, "capacity_mw": 600, "fuel_category": "gas", "clean_multiplier": 0.1}
            ]"#,
        )
        .unwrap();

        let assets = load_assets(&path).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].fuel_category, FuelCategory::Solar);
        assert_eq!(assets[0].clean_multiplier, 1.0);
        assert_eq!(assets[1].clean_multiplier, 0.1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_negative_capacity() {
        let path = env::temp_dir().join("grid_siting_test_assets_negative.json");
        fs::write(
            &path,
            r#"[{"id": 7, "name": "Bad", "latitude": 35.0, "longitude": -111.0, "capacity_mw": -1, "fuel_category": "wind"}]"#,
        )
        .unwrap();

        let err = load_assets(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("Invalid asset 7"));
        assert!(message.contains("non-negative"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_multiplier_out_of_range() {
        let record = AssetRecord {
            id: 1,
            name: "Over".to_string(),
            latitude: 35.0,
            longitude: -111.0,
            capacity_mw: 10.0,
            fuel_category: FuelCategory::Wind,
            clean_multiplier: Some(1.5),
        };
        assert!(Asset::try_from(record).is_err());
    }

    #[test]
    fn test_load_nodes() {
        let path = env::temp_dir().join("grid_siting_test_nodes.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "name": "Mesa", "latitude": 35.0, "longitude": -111.0, "reliability": 82.5, "state": "AZ"},
                {"id": 2, "name": "Basin", "latitude": 36.0, "longitude": -112.0, "reliability": 64}
            ]"#,
        )
        .unwrap();

        let nodes = load_nodes(&path).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].state.as_deref(), Some("AZ"));
        assert!(nodes[1].region.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_rejects_bad_reliability() {
        let record = NodeRecord {
            id: 3,
            name: "Odd".to_string(),
            latitude: 35.0,
            longitude: -111.0,
            reliability: 140.0,
            region: None,
            state: None,
        };
        assert!(NodeSite::try_from(record).is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = env::temp_dir().join("grid_siting_test_nodes_missing.json");
        let _ = fs::remove_file(&path);
        let err = load_nodes(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open node dataset"));
    }
}
