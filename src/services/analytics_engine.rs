//! Analytics engine: descriptive signals over a move sequence.
//!
//! Every function is a pure transform of the move list. Degenerate input
//! (fewer than two moves, or a side with no moves) yields the documented
//! fallback instead of an error, and every divisor that can legitimately be
//! zero is guarded.

use tracing::debug;

use crate::domain::models::{AnalyticsConfig, AnalyticsSnapshot, Move, NegotiationStatus};

/// Demand and offer amounts split out of a move list, order preserved.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sides {
    pub demands: Vec<f64>,
    pub offers: Vec<f64>,
}

impl Sides {
    pub fn split(moves: &[Move]) -> Self {
        let mut sides = Self::default();
        for mv in moves {
            if mv.is_demand() {
                sides.demands.push(mv.amount);
            } else {
                sides.offers.push(mv.amount);
            }
        }
        sides
    }

    pub fn last_demand(&self) -> Option<f64> {
        self.demands.last().copied()
    }

    pub fn last_offer(&self) -> Option<f64> {
        self.offers.last().copied()
    }

    /// First and last demand plus first and last offer, or `None` when the
    /// trend metrics are undefined.
    fn trend_endpoints(&self, move_count: usize) -> Option<Endpoints> {
        if move_count < 2 {
            return None;
        }
        Some(Endpoints {
            first_demand: *self.demands.first()?,
            last_demand: *self.demands.last()?,
            first_offer: *self.offers.first()?,
            last_offer: *self.offers.last()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Endpoints {
    first_demand: f64,
    last_demand: f64,
    first_offer: f64,
    last_offer: f64,
}

/// `delta` as a percentage of `base`, 0 when `base` is zero.
fn percent_of(delta: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        delta / base * 100.0
    }
}

/// Arithmetic midpoint of a demand and an offer.
pub fn midpoint(demand: f64, offer: f64) -> f64 {
    (demand + offer) / 2.0
}

/// Service computing descriptive analytics for a negotiation.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Create an engine with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom weights
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Weights in use
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Demand and offer movement percentages, both positive when the sides
    /// moved toward each other.
    fn movements(&self, moves: &[Move]) -> (f64, f64) {
        let Some(ends) = Sides::split(moves).trend_endpoints(moves.len()) else {
            return (0.0, 0.0);
        };
        let demand_movement =
            percent_of(ends.first_demand - ends.last_demand, ends.first_demand);
        let offer_movement = percent_of(ends.last_offer - ends.first_offer, ends.first_offer);
        (demand_movement, offer_movement)
    }

    /// Average movement of both sides toward each other, in percent.
    pub fn momentum(&self, moves: &[Move]) -> f64 {
        let (demand_movement, offer_movement) = self.movements(moves);
        (demand_movement + offer_movement) / 2.0
    }

    /// Share of the opening gap closed since the first demand and offer.
    pub fn convergence_rate(&self, moves: &[Move]) -> f64 {
        let Some(ends) = Sides::split(moves).trend_endpoints(moves.len()) else {
            return 0.0;
        };
        let initial_gap = (ends.first_demand - ends.first_offer).abs();
        if initial_gap == 0.0 {
            return 0.0;
        }
        let current_gap = (ends.last_demand - ends.last_offer).abs();
        (initial_gap - current_gap) / initial_gap * 100.0
    }

    /// Average of the midpoints of the i-th demand and i-th offer.
    pub fn midpoint_of_midpoints(&self, moves: &[Move]) -> Option<f64> {
        let sides = Sides::split(moves);
        sides.trend_endpoints(moves.len())?;

        let pairs: Vec<f64> = sides
            .demands
            .iter()
            .zip(&sides.offers)
            .map(|(&d, &o)| midpoint(d, o))
            .collect();
        Some(pairs.iter().sum::<f64>() / pairs.len() as f64)
    }

    /// Settlement forecast blending the latest midpoint with the average of
    /// every amount ever put on the table.
    pub fn predict_settlement(&self, moves: &[Move]) -> Option<f64> {
        let ends = Sides::split(moves).trend_endpoints(moves.len())?;

        let trend = midpoint(ends.last_demand, ends.last_offer);
        let historical = moves.iter().map(|m| m.amount).sum::<f64>() / moves.len() as f64;
        let prediction =
            (trend * self.config.trend_weight + historical * self.config.history_weight).round();

        debug_assert!(prediction.is_finite(), "non-finite settlement prediction");
        Some(prediction)
    }

    /// Confidence in the prediction, always within 0-100.
    pub fn confidence(&self, moves: &[Move]) -> f64 {
        if Sides::split(moves).trend_endpoints(moves.len()).is_none() {
            return 0.0;
        }
        let score = self.convergence_rate(moves) * self.config.convergence_weight
            + self.momentum(moves).max(0.0) * self.config.momentum_weight;
        score.clamp(0.0, 100.0)
    }

    /// Initiated, active, or settled once the gap is within the settled ratio of the last offer.
    pub fn status(&self, moves: &[Move]) -> NegotiationStatus {
        if moves.is_empty() {
            return NegotiationStatus::Initiated;
        }
        let sides = Sides::split(moves);
        let (Some(last_demand), Some(last_offer)) = (sides.last_demand(), sides.last_offer())
        else {
            return NegotiationStatus::Active;
        };

        let gap = (last_demand - last_offer).abs();
        let settled = if last_offer == 0.0 {
            gap == 0.0
        } else {
            gap / last_offer < self.config.settled_gap_ratio
        };

        if settled {
            NegotiationStatus::Settled
        } else {
            NegotiationStatus::Active
        }
    }

    /// Full snapshot of the move list.
    pub fn analyze(&self, moves: &[Move]) -> AnalyticsSnapshot {
        let sides = Sides::split(moves);
        let (last_demand, last_offer) = (sides.last_demand(), sides.last_offer());
        let (demand_movement, offer_movement) = self.movements(moves);

        let snapshot = AnalyticsSnapshot {
            midpoint: last_demand
                .zip(last_offer)
                .map(|(d, o)| midpoint(d, o).round()),
            momentum: (demand_movement + offer_movement) / 2.0,
            convergence_rate: self.convergence_rate(moves),
            midpoint_of_midpoints: self.midpoint_of_midpoints(moves).map(f64::round),
            predicted_settlement: self.predict_settlement(moves),
            confidence: self.confidence(moves),
            status: self.status(moves),
            current_gap: last_demand
                .zip(last_offer)
                .map(|(d, o)| (d - o).abs().round()),
            demand_movement,
            offer_movement,
            move_count: moves.len(),
            demand_count: sides.demands.len(),
            offer_count: sides.offers.len(),
        };

        debug!(
            moves = snapshot.move_count,
            momentum = snapshot.momentum,
            convergence_rate = snapshot.convergence_rate,
            confidence = snapshot.confidence,
            status = snapshot.status.as_str(),
            "computed negotiation analytics"
        );
        snapshot
    }

    /// Snapshot after each move, oldest first.
    ///
    /// This is the series a record layer accumulates when it recomputes
    /// analytics on every move insert.
    pub fn history(&self, moves: &[Move]) -> Vec<AnalyticsSnapshot> {
        (1..=moves.len()).map(|n| self.analyze(&moves[..n])).collect()
    }
}
