pub mod adequacy;
pub mod aggregate;
pub mod config;
pub mod decay;
pub mod distance;
pub mod engine;
pub mod normalization;
pub mod validation;
pub mod weights;

pub use adequacy::{adequacy_band, adequacy_factor, AdequacyBand};
pub use aggregate::{clean_gen_score, reliability_estimate, transmission_score};
pub use config::*;
pub use decay::{proximity_decay, transmission_decay, VoltageClass};
pub use distance::planar_distance;
pub use engine::{compute, round_display, AdequacyAdjustment, Metric, MetricContribution, ScoreBreakdown};
pub use normalization::{
    estimate_normalization_factor, estimate_transmission_normalization_factor, NormalizationFactors,
};
pub use validation::{validate_demand, validate_scoring, validate_weights};
pub use weights::Weights;
