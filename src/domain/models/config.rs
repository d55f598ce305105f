//! Configuration tables: logging plus one business-rule table per engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Negotiator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Business-rule tables for the three engines
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file logs: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Per-engine multiplier tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Analytics weights
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Recommendation step sizing
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Bracket multipliers
    #[serde(default)]
    pub bracket: BracketConfig,
}

/// Weights used by the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AnalyticsConfig {
    /// Weight of the latest-positions midpoint in the settlement prediction
    pub trend_weight: f64,
    /// Weight of the all-moves average in the settlement prediction
    pub history_weight: f64,
    /// Weight of convergence rate in confidence
    pub convergence_weight: f64,
    /// Weight of positive momentum in confidence
    pub momentum_weight: f64,
    /// Gap / last offer below which a negotiation counts as settled
    pub settled_gap_ratio: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            trend_weight: 0.7,
            history_weight: 0.3,
            convergence_weight: 0.6,
            momentum_weight: 0.4,
            settled_gap_ratio: 0.05,
        }
    }
}

/// Step sizing for the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RecommendationConfig {
    /// Share of the distance to the anchor covered by one move
    pub step_fraction: f64,
    /// How strongly momentum scales the step
    pub momentum_sensitivity: f64,
    /// Share of the current gap always left between the move and the anchor
    pub residual_gap_fraction: f64,
    /// Gap / last offer below which movement is damped
    pub damping_gap_ratio: f64,
    /// Multiplier applied to the movement when damped
    pub damping_factor: f64,
    /// Momentum above which the trend reads as good convergence
    pub good_convergence_momentum: f64,
    /// Momentum below which the trend reads as diverging
    pub diverging_momentum: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            step_fraction: 0.7,
            momentum_sensitivity: 0.3,
            residual_gap_fraction: 0.05,
            damping_gap_ratio: 0.15,
            damping_factor: 0.5,
            good_convergence_momentum: 5.0,
            diverging_momentum: -5.0,
        }
    }
}

/// Multipliers for every bracket strategy and the post-processing rules.
///
/// Branches deliberately carry their own constants even where two of them
/// describe the same idea (see `evaluation_offer_only_defendant_ratio`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BracketConfig {
    /// Minimum for either side of the bracket
    pub amount_floor: f64,

    /// Low end of the evaluation range as a share of adjusted case value
    pub evaluation_low_ratio: f64,
    /// High end of the evaluation range as a share of adjusted case value
    pub evaluation_high_ratio: f64,
    /// Plaintiff target relative to the high end of the range
    pub evaluation_plaintiff_markup: f64,
    /// Defendant target relative to the low end of the range
    pub evaluation_defendant_ratio: f64,
    /// Defendant target relative to the low end when only an offer exists
    pub evaluation_offer_only_defendant_ratio: f64,

    /// Plaintiff target relative to the settlement goal
    pub goal_plaintiff_markup: f64,
    /// Share of the distance from the last offer to the goal
    pub goal_defendant_step: f64,
    /// Defendant target relative to the goal when no offer exists
    pub goal_defendant_ratio: f64,

    /// Spread around the midpoint as a share of the gap
    pub midpoint_spread: f64,

    /// Plaintiff target as a share of a lone demand
    pub demand_only_plaintiff_ratio: f64,
    /// Defendant target as a share of a lone demand
    pub demand_only_defendant_ratio: f64,
    /// Plaintiff target as a multiple of a lone offer
    pub offer_only_plaintiff_ratio: f64,
    /// Defendant target as a multiple of a lone offer
    pub offer_only_defendant_ratio: f64,

    /// Plaintiff target as a share of the coverage limit when nothing else is known
    pub limit_plaintiff_ratio: f64,
    /// Defendant target as a share of the coverage limit when nothing else is known
    pub limit_defendant_ratio: f64,

    /// Opening plaintiff target with no data at all
    pub fallback_plaintiff_amount: f64,
    /// Opening defendant target with no data at all
    pub fallback_defendant_amount: f64,

    /// Repaired plaintiff = old defendant * this
    pub repair_plaintiff_multiplier: f64,
    /// Repaired defendant = old plaintiff * this
    pub repair_defendant_multiplier: f64,

    /// Plaintiff target after clamping, as a share of the limit
    pub limit_clamp_ratio: f64,
    /// Defendant is re-clamped once it exceeds this share of the plaintiff
    pub limit_defendant_trigger_ratio: f64,
    /// Re-clamped defendant as a share of the plaintiff
    pub limit_defendant_clamp_ratio: f64,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            amount_floor: 1_000.0,
            evaluation_low_ratio: 0.6,
            evaluation_high_ratio: 0.9,
            evaluation_plaintiff_markup: 1.1,
            evaluation_defendant_ratio: 0.9,
            evaluation_offer_only_defendant_ratio: 0.8,
            goal_plaintiff_markup: 1.15,
            goal_defendant_step: 0.6,
            goal_defendant_ratio: 0.6,
            midpoint_spread: 0.1,
            demand_only_plaintiff_ratio: 0.85,
            demand_only_defendant_ratio: 0.5,
            offer_only_plaintiff_ratio: 2.5,
            offer_only_defendant_ratio: 1.3,
            limit_plaintiff_ratio: 0.9,
            limit_defendant_ratio: 0.5,
            fallback_plaintiff_amount: 2_000_000.0,
            fallback_defendant_amount: 750_000.0,
            repair_plaintiff_multiplier: 1.5,
            repair_defendant_multiplier: 0.7,
            limit_clamp_ratio: 0.95,
            limit_defendant_trigger_ratio: 0.7,
            limit_defendant_clamp_ratio: 0.6,
        }
    }
}
