//! Bracket suggestion model.

use serde::{Deserialize, Serialize};

/// Which sides have a number on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveState {
    /// A demand and an offer are known
    BothSides,
    /// Only the plaintiff has moved
    DemandOnly,
    /// Only the defendant has moved
    OfferOnly,
    /// Nothing on the table yet
    NoMoves,
}

impl MoveState {
    /// Classify from the latest demand and offer, if any.
    pub fn classify(last_demand: Option<f64>, last_offer: Option<f64>) -> Self {
        match (last_demand, last_offer) {
            (Some(_), Some(_)) => Self::BothSides,
            (Some(_), None) => Self::DemandOnly,
            (None, Some(_)) => Self::OfferOnly,
            (None, None) => Self::NoMoves,
        }
    }
}

/// The reference a bracket was positioned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketAnchor {
    /// Adjusted case value from the damages evaluation
    Evaluation,
    /// Caller-supplied settlement goal
    SettlementGoal,
    /// Midpoint of the last demand and last offer
    Midpoint,
    /// Fixed ratios of the lone demand
    DemandRatio,
    /// Fixed ratios of the lone offer
    OfferRatio,
    /// Fixed ratios of the coverage limit
    PolicyLimit,
    /// Absolute opening bracket when nothing else is known
    Fallback,
}

impl BracketAnchor {
    /// Snake-case name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Evaluation => "evaluation",
            Self::SettlementGoal => "settlement_goal",
            Self::Midpoint => "midpoint",
            Self::DemandRatio => "demand_ratio",
            Self::OfferRatio => "offer_ratio",
            Self::PolicyLimit => "policy_limit",
            Self::Fallback => "fallback",
        }
    }
}

/// A paired plaintiff/defendant target range. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSuggestion {
    /// Plaintiff target, always above the defendant target
    pub plaintiff_amount: f64,
    /// Defendant target, never below the amount floor
    pub defendant_amount: f64,
    /// Rendered explanation of the anchor and any adjustments
    pub reasoning: String,
    /// Strategy that positioned the bracket
    pub anchor: BracketAnchor,
    /// The plaintiff target was pulled under the coverage limit
    pub clamped_to_limit: bool,
    /// The coverage limit sits below what the amount floor allows, so the
    /// plaintiff target stays above it
    pub limit_unsatisfiable: bool,
    /// The defendant target reached the plaintiff target and the pair was re-spread
    pub order_repaired: bool,
}
