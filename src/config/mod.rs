mod schema;

pub use schema::{Config, DatasetConfig, NearbyConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::{validate_scoring, validate_weights};

/// Get the config directory path (~/.config/grid-siting/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("grid-siting"))
}

/// Get the default config file path (~/.config/grid-siting/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/grid-siting/config.yaml) and falls back to built-in defaults
///   when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate a loaded configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(weights) = &config.weights {
        if let Err(e) = validate_weights(weights.clean, weights.transmission, weights.reliability) {
            errors.push(format!("weights: {}", e));
        }
    }

    if let Some(scoring) = &config.scoring {
        if let Err(scoring_errors) = validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    if let Some(max) = config.nearby.as_ref().and_then(|n| n.max_distance_km) {
        if !max.is_finite() || max < 0.0 {
            errors.push(format!("nearby.max_distance_km: must be zero or more, got {}", max));
        }
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
    use crate::scoring::{ScoringConfig, Weights};
    use std::env;

    #[test]
    fn test_load_config_from_file() {
        let path = env::temp_dir().join("grid_siting_test_config.yaml");
        fs::write(&path, "alternatives_limit: 8\nscoring:\n  percentile: 0.95\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.alternatives_limit(), 8);
        assert_eq!(config.scoring().percentile(), 0.95);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let path = env::temp_dir().join("grid_siting_test_config_missing.yaml");
        let _ = fs::remove_file(&path);
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("grid_siting_test_config_invalid.yaml");
        fs::write(&path, "weights: [unclosed\n").unwrap();
        assert!(load_config(Some(path.clone())).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = Config {
            weights: Some(Weights {
                clean: 0.5,
                transmission: 0.5,
                reliability: 0.5,
            }),
            scoring: Some(ScoringConfig {
                percentile: Some(2.0),
                demand_min_mw: None,
                demand_max_mw: None,
            }),
            nearby: Some(NearbyConfig {
                max_distance_km: Some(-1.0),
                limit: None,
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("weights:"));
        assert!(errors[1].contains("scoring.percentile"));
        assert!(errors[2].contains("nearby.max_distance_km"));
    }
}
