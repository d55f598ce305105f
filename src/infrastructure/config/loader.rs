//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::{
    AnalyticsConfig, BracketConfig, Config, RecommendationConfig,
};

/// Project-local directory holding configuration files
pub const CONFIG_DIR: &str = ".negotiator";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown `logging.level`
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown `logging.format`
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown `logging.rotation`
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    /// A weight or fraction outside 0-1
    #[error("Invalid weight {name}: {value}. Must be between 0 and 1")]
    InvalidWeight { name: &'static str, value: f64 },

    /// A blend whose weights do not add up to 1
    #[error("Weights {names} must sum to 1, got {sum}")]
    WeightsDoNotSum { names: &'static str, sum: f64 },

    /// A threshold that must be positive is not
    #[error("Invalid threshold {name}: {value}. Must be positive")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A negative or non-finite multiplier
    #[error("Invalid multiplier {name}: {value}. Must be a non-negative number")]
    InvalidMultiplier { name: &'static str, value: f64 },

    /// Any other cross-field inconsistency
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .negotiator/config.yaml (project config, created by init)
    /// 3. .negotiator/local.yaml (project local overrides, optional)
    /// 4. Environment variables (NEGOTIATOR_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed("NEGOTIATOR_").split("__"))
    }

    /// Default configuration rendered as YAML, as written by `init`
    pub fn default_yaml() -> Result<String> {
        serde_yaml::to_string(&Config::default()).context("Failed to serialize default config")
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Self::validate_analytics(&config.engine.analytics)?;
        Self::validate_recommendation(&config.engine.recommendation)?;
        Self::validate_bracket(&config.engine.bracket)?;
        Ok(())
    }

    fn validate_analytics(cfg: &AnalyticsConfig) -> Result<(), ConfigError> {
        for (name, value) in [
            ("trend_weight", cfg.trend_weight),
            ("history_weight", cfg.history_weight),
            ("convergence_weight", cfg.convergence_weight),
            ("momentum_weight", cfg.momentum_weight),
        ] {
            check_weight(name, value)?;
        }

        check_sum(
            "trend_weight + history_weight",
            cfg.trend_weight + cfg.history_weight,
        )?;
        check_sum(
            "convergence_weight + momentum_weight",
            cfg.convergence_weight + cfg.momentum_weight,
        )?;
        check_positive("settled_gap_ratio", cfg.settled_gap_ratio)
    }

    fn validate_recommendation(cfg: &RecommendationConfig) -> Result<(), ConfigError> {
        check_weight("step_fraction", cfg.step_fraction)?;
        check_weight("residual_gap_fraction", cfg.residual_gap_fraction)?;
        check_multiplier("momentum_sensitivity", cfg.momentum_sensitivity)?;
        check_positive("damping_gap_ratio", cfg.damping_gap_ratio)?;

        if !(cfg.damping_factor > 0.0 && cfg.damping_factor <= 1.0) {
            return Err(ConfigError::InvalidWeight {
                name: "damping_factor",
                value: cfg.damping_factor,
            });
        }

        if cfg.diverging_momentum > cfg.good_convergence_momentum {
            return Err(ConfigError::ValidationFailed(format!(
                "diverging_momentum ({}) must not exceed good_convergence_momentum ({})",
                cfg.diverging_momentum, cfg.good_convergence_momentum
            )));
        }
        Ok(())
    }

    fn validate_bracket(cfg: &BracketConfig) -> Result<(), ConfigError> {
        check_positive("amount_floor", cfg.amount_floor)?;

        for (name, value) in [
            ("evaluation_low_ratio", cfg.evaluation_low_ratio),
            ("evaluation_high_ratio", cfg.evaluation_high_ratio),
            ("evaluation_plaintiff_markup", cfg.evaluation_plaintiff_markup),
            ("evaluation_defendant_ratio", cfg.evaluation_defendant_ratio),
            (
                "evaluation_offer_only_defendant_ratio",
                cfg.evaluation_offer_only_defendant_ratio,
            ),
            ("goal_plaintiff_markup", cfg.goal_plaintiff_markup),
            ("goal_defendant_step", cfg.goal_defendant_step),
            ("goal_defendant_ratio", cfg.goal_defendant_ratio),
            ("midpoint_spread", cfg.midpoint_spread),
            ("demand_only_plaintiff_ratio", cfg.demand_only_plaintiff_ratio),
            ("demand_only_defendant_ratio", cfg.demand_only_defendant_ratio),
            ("offer_only_plaintiff_ratio", cfg.offer_only_plaintiff_ratio),
            ("offer_only_defendant_ratio", cfg.offer_only_defendant_ratio),
            ("limit_plaintiff_ratio", cfg.limit_plaintiff_ratio),
            ("limit_defendant_ratio", cfg.limit_defendant_ratio),
            ("fallback_plaintiff_amount", cfg.fallback_plaintiff_amount),
            ("fallback_defendant_amount", cfg.fallback_defendant_amount),
            ("repair_plaintiff_multiplier", cfg.repair_plaintiff_multiplier),
            ("repair_defendant_multiplier", cfg.repair_defendant_multiplier),
            ("limit_clamp_ratio", cfg.limit_clamp_ratio),
            ("limit_defendant_trigger_ratio", cfg.limit_defendant_trigger_ratio),
            ("limit_defendant_clamp_ratio", cfg.limit_defendant_clamp_ratio),
        ] {
            check_multiplier(name, value)?;
        }
        Ok(())
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight { name, value })
    }
}

fn check_sum(names: &'static str, sum: f64) -> Result<(), ConfigError> {
    if (sum - 1.0).abs() <= 1e-9 {
        Ok(())
    } else {
        Err(ConfigError::WeightsDoNotSum { names, sum })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

fn check_multiplier(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert!((config.engine.analytics.trend_weight - 0.7).abs() < f64::EPSILON);
        assert!((config.engine.bracket.amount_floor - 1_000.0).abs() < f64::EPSILON);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
  format: json
engine:
  recommendation:
    step_fraction: 0.5
  bracket:
    amount_floor: 2500
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!((config.engine.recommendation.step_fraction - 0.5).abs() < f64::EPSILON);
        // untouched fields keep their business-rule defaults
        assert!((config.engine.recommendation.damping_gap_ratio - 0.15).abs() < f64::EPSILON);
        assert!((config.engine.bracket.amount_floor - 2_500.0).abs() < f64::EPSILON);
        assert!((config.engine.bracket.goal_plaintiff_markup - 1.15).abs() < f64::EPSILON);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogFormat(_)
        ));
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidRotation(_)
        ));
    }

    #[test]
    fn test_validate_prediction_weights_must_sum_to_one() {
        let mut config = Config::default();
        config.engine.analytics.trend_weight = 0.8;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::WeightsDoNotSum { .. }
        ));
    }

    #[test]
    fn test_validate_weight_out_of_range() {
        let mut config = Config::default();
        config.engine.analytics.convergence_weight = 1.4;
        config.engine.analytics.momentum_weight = -0.4;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidWeight {
                name: "convergence_weight",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_damping_factor() {
        let mut config = Config::default();
        config.engine.recommendation.damping_factor = 0.0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidWeight {
                name: "damping_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_momentum_buckets_ordered() {
        let mut config = Config::default();
        config.engine.recommendation.diverging_momentum = 10.0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::ValidationFailed(_)
        ));
    }

    #[test]
    fn test_validate_zero_floor() {
        let mut config = Config::default();
        config.engine.bracket.amount_floor = 0.0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidThreshold {
                name: "amount_floor",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_negative_multiplier() {
        let mut config = Config::default();
        config.engine.bracket.offer_only_plaintiff_ratio = -2.5;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMultiplier { .. }
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "engine:\n  bracket:\n    fallback_plaintiff_amount: 1500000"
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert!((config.engine.bracket.fallback_plaintiff_amount - 1_500_000.0).abs() < f64::EPSILON);
        assert!((config.engine.bracket.fallback_defendant_amount - 750_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  format: xml").unwrap();
        file.flush().unwrap();

        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_env_override() {
        temp_env::with_vars(
            [
                ("NEGOTIATOR_LOGGING__LEVEL", Some("debug")),
                ("NEGOTIATOR_ENGINE__BRACKET__AMOUNT_FLOOR", Some("5000")),
            ],
            || {
                let config: Config = ConfigLoader::figment().extract().unwrap();
                assert_eq!(config.logging.level, "debug");
                assert!((config.engine.bracket.amount_floor - 5_000.0).abs() < f64::EPSILON);
            },
        );
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "logging:\n  level: info\n  format: json\nengine:\n  analytics:\n    settled_gap_ratio: 0.1"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "logging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
        assert!((config.engine.analytics.settled_gap_ratio - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_yaml_round_trips() {
        let yaml = ConfigLoader::default_yaml().unwrap();
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.engine, Config::default().engine);
    }
}
