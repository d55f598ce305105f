//! Next-move recommendation model.

use serde::{Deserialize, Serialize};

use super::negotiation::{MoveType, Party};

/// What the recommended movement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecommendationAnchor {
    /// The caller-supplied settlement goal
    SettlementGoal(f64),
    /// Midpoint of the last demand and last offer
    Midpoint(f64),
}

impl RecommendationAnchor {
    /// The anchor amount
    pub fn value(&self) -> f64 {
        match self {
            Self::SettlementGoal(v) | Self::Midpoint(v) => *v,
        }
    }
}

/// Momentum bucket used in the rationale text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumTrend {
    /// Momentum above the convergence threshold
    GoodConvergence,
    /// Momentum between the two thresholds
    Steady,
    /// Momentum below the divergence threshold
    Diverging,
}

impl MomentumTrend {
    /// Phrase used in the rationale
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodConvergence => "good convergence",
            Self::Steady => "steady",
            Self::Diverging => "diverging",
        }
    }
}

/// Advisory output of the recommendation engine. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Side that should move next
    pub party: Party,
    /// Demand for the plaintiff, offer for the defendant
    #[serde(rename = "type")]
    pub move_type: MoveType,
    /// Recommended amount, rounded and never negative
    pub suggested_amount: f64,
    /// Analytics confidence for the same moves, 0-100
    pub confidence: f64,
    /// Rendered explanation
    pub reasoning: String,
    /// What the movement was measured against
    pub anchor: RecommendationAnchor,
    /// |last demand - last offer|, rounded
    pub current_gap: f64,
    /// Momentum bucket named in the rationale
    pub momentum_trend: MomentumTrend,
    /// Whether the closing-gap damping halved the movement
    pub damped: bool,
}
