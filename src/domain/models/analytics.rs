//! Analytics snapshot model.

use serde::{Deserialize, Serialize};

/// Coarse classification of where a negotiation stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    /// No moves yet
    #[default]
    Initiated,
    /// Positions are still apart, or only one side has moved
    Active,
    /// Last demand and last offer are within the settled threshold
    Settled,
}

impl NegotiationStatus {
    /// Lowercase name used in output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Active => "active",
            Self::Settled => "settled",
        }
    }
}

impl std::fmt::Display for NegotiationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived view of a move list, recomputed from scratch on every call.
///
/// Monetary fields are rounded to whole units; percentages are not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Midpoint of the most recent demand and most recent offer
    pub midpoint: Option<f64>,
    /// Average of demand and offer movement percentages
    pub momentum: f64,
    /// Percentage of the opening gap closed so far
    pub convergence_rate: f64,
    /// Average of index-paired demand/offer midpoints
    pub midpoint_of_midpoints: Option<f64>,
    /// Weighted blend of the latest midpoint and the all-moves average
    pub predicted_settlement: Option<f64>,
    /// 0-100
    pub confidence: f64,
    /// Coarse classification
    pub status: NegotiationStatus,
    /// |last demand - last offer|
    pub current_gap: Option<f64>,
    /// How far the plaintiff has come down from the first demand, in percent
    pub demand_movement: f64,
    /// How far the defendant has come up from the first offer, in percent
    pub offer_movement: f64,
    /// Number of moves analysed
    pub move_count: usize,
    /// Number of demand-type moves
    pub demand_count: usize,
    /// Number of offer-type moves
    pub offer_count: usize,
}
