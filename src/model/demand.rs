use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of electro-intensive load being sited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandCategory {
    DataCenter,
    Electrolyzer,
    EvHub,
    HydrogenPlant,
    AiCompute,
}

impl DemandCategory {
    pub const ALL: [DemandCategory; 5] = [
        DemandCategory::DataCenter,
        DemandCategory::Electrolyzer,
        DemandCategory::EvHub,
        DemandCategory::HydrogenPlant,
        DemandCategory::AiCompute,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DemandCategory::DataCenter => "data_center",
            DemandCategory::Electrolyzer => "electrolyzer",
            DemandCategory::EvHub => "ev_hub",
            DemandCategory::HydrogenPlant => "hydrogen_plant",
            DemandCategory::AiCompute => "ai_compute",
        }
    }
}

impl fmt::Display for DemandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DemandCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match DemandCategory::ALL
            .iter()
            .find(|c| c.as_str() == normalized)
        {
            Some(category) => Ok(*category),
            None => bail!(
                "unknown demand type '{}' (expected one of: data_center, electrolyzer, ev_hub, hydrogen_plant, ai_compute)",
                s
            ),
        }
    }
}

/// Target load the site is evaluated for.
///
/// `NoDemand` leaves clean generation untouched; `Load` applies the capacity
/// adequacy factor for its size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandProfile {
    #[default]
    NoDemand,
    Load {
        size_mw: f64,
        category: DemandCategory,
    },
}

impl DemandProfile {
    pub fn load(size_mw: f64, category: DemandCategory) -> Self {
        DemandProfile::Load { size_mw, category }
    }

    pub fn size_mw(&self) -> Option<f64> {
        match self {
            DemandProfile::NoDemand => None,
            DemandProfile::Load { size_mw, .. } => Some(*size_mw),
        }
    }
}
