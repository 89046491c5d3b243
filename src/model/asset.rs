use serde::{Deserialize, Serialize};

pub type AssetId = u64;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Planar approximate distance in km (see [`crate::scoring::planar_distance`])
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        crate::scoring::planar_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// True when both components are finite and inside the valid lat/lon box
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Fuel/category tag of a generating asset.
///
/// Accepts both snake_case names and the upper-case eGRID category codes
/// (`SOLAR`, `OFSL`, ...). Anything unrecognised maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelCategory {
    #[serde(alias = "SOLAR")]
    Solar,
    #[serde(alias = "WIND")]
    Wind,
    #[serde(alias = "HYDRO")]
    Hydro,
    #[serde(alias = "GEOTHERMAL")]
    Geothermal,
    /// Battery storage paired with solar
    SolarStorage,
    #[serde(alias = "NUCLEAR")]
    Nuclear,
    #[serde(alias = "BIOMASS")]
    Biomass,
    #[serde(alias = "GAS")]
    Gas,
    #[serde(alias = "COAL")]
    Coal,
    #[serde(alias = "OIL")]
    Oil,
    #[serde(alias = "OFSL")]
    OtherFossil,
    #[serde(other)]
    Other,
}

impl FuelCategory {
    /// Clean multiplier used when a record does not carry its own.
    ///
    /// Only wind, solar, hydro and geothermal count as clean; storage and
    /// hydro lose a little to round-trip and spill losses.
    pub fn default_clean_multiplier(self) -> f64 {
        match self {
            FuelCategory::Solar | FuelCategory::Wind | FuelCategory::Geothermal => 1.0,
            FuelCategory::Hydro | FuelCategory::SolarStorage => 0.95,
            _ => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FuelCategory::Solar => "solar",
            FuelCategory::Wind => "wind",
            FuelCategory::Hydro => "hydro",
            FuelCategory::Geothermal => "geothermal",
            FuelCategory::SolarStorage => "solar+storage",
            FuelCategory::Nuclear => "nuclear",
            FuelCategory::Biomass => "biomass",
            FuelCategory::Gas => "gas",
            FuelCategory::Coal => "coal",
            FuelCategory::Oil => "oil",
            FuelCategory::OtherFossil => "other fossil",
            FuelCategory::Other => "other",
        }
    }
}

/// A capacity-bearing point source (power plant or renewable project).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
    pub coordinates: Coordinates,
    pub capacity_mw: f64,
    pub fuel_category: FuelCategory,
    pub clean_multiplier: f64,
}

impl Asset {
    /// Build an asset with the category's default clean multiplier
    pub fn new(
        id: AssetId,
        name: impl Into<String>,
        coordinates: Coordinates,
        capacity_mw: f64,
        fuel_category: FuelCategory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates,
            capacity_mw,
            fuel_category,
            clean_multiplier: fuel_category.default_clean_multiplier(),
        }
    }

    pub fn with_clean_multiplier(mut self, clean_multiplier: f64) -> Self {
        self.clean_multiplier = clean_multiplier;
        self
    }

    pub fn is_clean(&self) -> bool {
        self.clean_multiplier > 0.0
    }
}
