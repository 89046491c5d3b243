pub mod asset;
pub mod demand;
pub mod node;

pub use asset::{Asset, AssetId, Coordinates, FuelCategory};
pub use demand::{DemandCategory, DemandProfile};
pub use node::{MetricScores, Node, NodeId, NodeSite};
