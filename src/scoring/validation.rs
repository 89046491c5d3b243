use super::config::ScoringConfig;
use crate::error::{Result, SitingError};
use crate::model::DemandProfile;

/// Relative tolerance on the weight sum. Triples off by 1e-9 pass, triples
/// off by more than 1e-6 fail.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-7;

/// Check a weight triple. Each weight must lie in [0, 1] and the sum must be
/// 1.0 within [`WEIGHT_SUM_TOLERANCE`]. All problems are reported together.
pub fn validate_weights(clean: f64, transmission: f64, reliability: f64) -> Result<()> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("clean", clean),
        ("transmission", transmission),
        ("reliability", reliability),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            errors.push(format!("weight_{}: must be between 0 and 1, got {}", name, value));
        }
    }

    if errors.is_empty() {
        let total = clean + transmission + reliability;
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE * total.abs().max(1.0) {
            errors.push(format!("weights must sum to 1.0, got {:.10}", total));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SitingError::validation(errors.join("; ")))
    }
}

/// Check a demand profile against the configured size bounds
pub fn validate_demand(demand: &DemandProfile, config: &ScoringConfig) -> Result<()> {
    let Some(size_mw) = demand.size_mw() else {
        return Ok(());
    };
    let (min_mw, max_mw) = config.demand_bounds();
    if !size_mw.is_finite() || size_mw < min_mw || size_mw > max_mw {
        return Err(SitingError::validation(format!(
            "demand size must be between {} and {} MW, got {}",
            min_mw, max_mw, size_mw
        )));
    }
    Ok(())
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(p) = config.percentile {
        if !p.is_finite() || p <= 0.0 || p > 1.0 {
            errors.push(format!("scoring.percentile: must be in (0, 1], got {}", p));
        }
    }

    if let Some(min) = config.demand_min_mw {
        if !min.is_finite() || min <= 0.0 {
            errors.push(format!("scoring.demand_min_mw: must be positive, got {}", min));
        }
    }

    if let Some(max) = config.demand_max_mw {
        if !max.is_finite() || max <= 0.0 {
            errors.push(format!("scoring.demand_max_mw: must be positive, got {}", max));
        }
    }

    let (min, max) = config.demand_bounds();
    if min > max {
        errors.push(format!(
            "scoring.demand_min_mw: {} exceeds demand_max_mw {}",
            min, max
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DemandCategory;
    use proptest::prelude::*;

    #[test]
    fn test_valid_weights() {
        assert!(validate_weights(0.4, 0.35, 0.25).is_ok());
        assert!(validate_weights(1.0, 0.0, 0.0).is_ok());
        assert!(validate_weights(0.1, 0.2, 0.7).is_ok());
    }

    #[test]
    fn test_weights_not_summing_to_one() {
        let err = validate_weights(0.4, 0.4, 0.4).unwrap_err();
        match err {
            SitingError::Validation(reason) => assert!(reason.contains("sum to 1.0")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_weight_out_of_range() {
        let err = validate_weights(1.2, -0.1, -0.1).unwrap_err();
        let SitingError::Validation(reason) = err else {
            panic!("expected validation error");
        };
        assert!(reason.contains("weight_clean"));
        assert!(reason.contains("weight_transmission"));
        assert!(reason.contains("weight_reliability"));
    }

    #[test]
    fn test_nan_weight_rejected() {
        assert!(validate_weights(f64::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_demand_bounds() {
        let config = ScoringConfig::default();
        assert!(validate_demand(&DemandProfile::NoDemand, &config).is_ok());
        assert!(validate_demand(&DemandProfile::load(10.0, DemandCategory::EvHub), &config).is_ok());
        assert!(validate_demand(&DemandProfile::load(2000.0, DemandCategory::DataCenter), &config).is_ok());
        assert!(validate_demand(&DemandProfile::load(5.0, DemandCategory::EvHub), &config).is_err());
        assert!(validate_demand(&DemandProfile::load(2500.0, DemandCategory::AiCompute), &config).is_err());
        assert!(validate_demand(&DemandProfile::load(f64::NAN, DemandCategory::AiCompute), &config).is_err());
    }

    #[test]
    fn test_valid_scoring_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_scoring_config() {
        let config = ScoringConfig {
            percentile: None,
            demand_min_mw: None,
            demand_max_mw: None,
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_invalid_percentile() {
        let config = ScoringConfig {
            percentile: Some(1.5),
            demand_min_mw: None,
            demand_max_mw: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.percentile"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            percentile: Some(0.0),     // Error 1
            demand_min_mw: Some(-5.0), // Error 2
            demand_max_mw: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_inverted_demand_bounds() {
        let config = ScoringConfig {
            percentile: None,
            demand_min_mw: Some(500.0),
            demand_max_mw: Some(100.0),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("exceeds"));
    }

    proptest! {
        #[test]
        fn accepts_sums_within_1e9(
            clean in 0.0f64..=0.5,
            transmission in 0.0f64..=0.5,
            eps in -1e-9f64..=1e-9,
        ) {
            let reliability = 1.0 - clean - transmission + eps;
            prop_assume!((0.0..=1.0).contains(&reliability));
            prop_assert!(validate_weights(clean, transmission, reliability).is_ok());
        }

        #[test]
        fn rejects_sums_off_by_more_than_1e6(
            clean in 0.0f64..=0.5,
            transmission in 0.0f64..=0.5,
            magnitude in 1.01e-6f64..0.5,
            negative: bool,
        ) {
            let eps = if negative { -magnitude } else { magnitude };
            let reliability = 1.0 - clean - transmission + eps;
            prop_assert!(validate_weights(clean, transmission, reliability).is_err());
        }
    }
}
