//! Recommendation engine: whose turn it is and what number to put forward.

use tracing::debug;

use super::analytics_engine::{midpoint, AnalyticsEngine, Sides};
use super::rationale::{render_recommendation, RecommendationFacts};
use crate::domain::models::{
    Move, MoveType, MomentumTrend, NegotiationContext, Party, Recommendation,
    RecommendationAnchor, RecommendationConfig,
};

/// Numeric outcome of a recommendation, before any text is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationDecision {
    /// Side that should move next
    pub party: Party,
    /// Move type for that side
    pub move_type: MoveType,
    /// Rounded amount, floored at 0
    pub suggested_amount: f64,
    /// Goal or midpoint the step aimed at
    pub anchor: RecommendationAnchor,
    /// Unrounded gap between the latest positions
    pub current_gap: f64,
    /// Latest offer
    pub last_offer: f64,
    /// Momentum used to scale the step
    pub momentum: f64,
    /// Whether closing-gap damping fired
    pub damped: bool,
}

/// Service proposing the next move of a negotiation.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    analytics: AnalyticsEngine,
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Create an engine with the default step sizing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom step sizing and analytics weights
    pub fn with_config(analytics: AnalyticsEngine, config: RecommendationConfig) -> Self {
        Self { analytics, config }
    }

    /// Side that should move next: the opposite of whoever moved last.
    ///
    /// Keyed on the move type, so a mediator relaying an offer counts as the
    /// defendant having moved.
    pub fn next_party(moves: &[Move]) -> Option<Party> {
        moves.last().map(|last| match last.move_type {
            MoveType::Offer => Party::Plaintiff,
            MoveType::Demand => Party::Defendant,
        })
    }

    /// Bucket a momentum value for the rationale
    pub fn momentum_trend(&self, momentum: f64) -> MomentumTrend {
        if momentum > self.config.good_convergence_momentum {
            MomentumTrend::GoodConvergence
        } else if momentum < self.config.diverging_momentum {
            MomentumTrend::Diverging
        } else {
            MomentumTrend::Steady
        }
    }

    /// Compute the numeric decision. `None` unless both a demand and an offer exist.
    pub fn decide(&self, context: &NegotiationContext, moves: &[Move]) -> Option<RecommendationDecision> {
        let sides = Sides::split(moves);
        let last_demand = sides.last_demand()?;
        let last_offer = sides.last_offer()?;
        let party = Self::next_party(moves)?;

        let cfg = &self.config;
        let current_gap = (last_demand - last_offer).abs();
        let momentum = self.analytics.momentum(moves);
        let momentum_adjustment = 1.0 + (momentum / 100.0) * cfg.momentum_sensitivity;
        let step = cfg.step_fraction * momentum_adjustment;
        let residual = current_gap * cfg.residual_gap_fraction;

        let anchor = match context.settlement_goal {
            Some(goal) => RecommendationAnchor::SettlementGoal(goal),
            None => RecommendationAnchor::Midpoint(midpoint(last_demand, last_offer)),
        };
        let target = anchor.value();

        let (from, proposed) = match party {
            Party::Plaintiff => {
                let proposed = last_demand - (last_demand - target) * step;
                (last_demand, proposed.max(target + residual))
            }
            _ => {
                let proposed = last_offer + (target - last_offer) * step;
                (last_offer, proposed.min(target - residual))
            }
        };

        let damped = last_offer > 0.0 && current_gap / last_offer < cfg.damping_gap_ratio;
        let proposed = if damped {
            from + (proposed - from) * cfg.damping_factor
        } else {
            proposed
        };

        debug_assert!(proposed.is_finite(), "non-finite recommended amount");

        let move_type = match party {
            Party::Plaintiff => MoveType::Demand,
            _ => MoveType::Offer,
        };

        Some(RecommendationDecision {
            party,
            move_type,
            suggested_amount: proposed.max(0.0).round(),
            anchor,
            current_gap,
            last_offer,
            momentum,
            damped,
        })
    }

    /// Recommend the next move with its rationale.
    pub fn recommend(&self, context: &NegotiationContext, moves: &[Move]) -> Option<Recommendation> {
        let decision = self.decide(context, moves)?;
        let trend = self.momentum_trend(decision.momentum);

        let reasoning = render_recommendation(&RecommendationFacts {
            current_gap: decision.current_gap,
            last_offer: decision.last_offer,
            momentum: decision.momentum,
            trend,
            anchor: decision.anchor,
            damped: decision.damped,
        });

        debug!(
            party = decision.party.as_str(),
            suggested_amount = decision.suggested_amount,
            anchor = decision.anchor.value(),
            damped = decision.damped,
            "computed next-move recommendation"
        );

        Some(Recommendation {
            party: decision.party,
            move_type: decision.move_type,
            suggested_amount: decision.suggested_amount,
            confidence: self.analytics.confidence(moves),
            reasoning,
            anchor: decision.anchor,
            current_gap: decision.current_gap.round(),
            momentum_trend: trend,
            damped: decision.damped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_context() -> NegotiationContext {
        NegotiationContext::default()
    }

    #[test]
    fn test_no_recommendation_without_both_sides() {
        let engine = RecommendationEngine::new();
        assert!(engine.recommend(&no_context(), &[]).is_none());
        assert!(engine
            .recommend(&no_context(), &[Move::demand(100_000.0)])
            .is_none());
        assert!(engine
            .recommend(&no_context(), &[Move::offer(10_000.0), Move::offer(20_000.0)])
            .is_none());
    }

    #[test]
    fn test_next_party_alternates() {
        let after_offer = vec![Move::demand(100.0), Move::offer(50.0)];
        assert_eq!(RecommendationEngine::next_party(&after_offer), Some(Party::Plaintiff));

        let after_demand = vec![Move::offer(50.0), Move::demand(100.0)];
        assert_eq!(RecommendationEngine::next_party(&after_demand), Some(Party::Defendant));

        assert_eq!(RecommendationEngine::next_party(&[]), None);
    }

    #[test]
    fn test_midpoint_anchor_plaintiff_step() {
        let engine = RecommendationEngine::new();
        let moves = vec![Move::demand(2_500_000.0), Move::offer(500_000.0)];

        let rec = engine.recommend(&no_context(), &moves).expect("recommendation");
        // midpoint 1.5M, 2.5M - 1M * 0.7 = 1.8M, floor 1.5M + 100k = 1.6M
        assert_eq!(rec.party, Party::Plaintiff);
        assert_eq!(rec.move_type, MoveType::Demand);
        assert_eq!(rec.suggested_amount, 1_800_000.0);
        assert_eq!(rec.anchor, RecommendationAnchor::Midpoint(1_500_000.0));
        assert!(!rec.damped);
        assert_eq!(rec.momentum_trend, MomentumTrend::Steady);
    }

    #[test]
    fn test_goal_anchor_defendant_step() {
        let engine = RecommendationEngine::new();
        let ctx = no_context().with_settlement_goal(300_000.0);
        let moves = vec![Move::offer(100_000.0), Move::demand(500_000.0)];

        let rec = engine.recommend(&ctx, &moves).expect("recommendation");
        // 100k + 200k * 0.7 = 240k, cap 300k - 20k = 280k
        assert_eq!(rec.party, Party::Defendant);
        assert_eq!(rec.move_type, MoveType::Offer);
        assert_eq!(rec.suggested_amount, 240_000.0);
        assert!(rec.reasoning.contains("settlement goal of $300,000"));
    }

    #[test]
    fn test_goal_anchor_respects_residual_room() {
        let engine = RecommendationEngine::new();
        // goal sits just above the offer: 70% of the way would overshoot the cap
        let ctx = no_context().with_settlement_goal(110_000.0);
        let moves = vec![Move::offer(100_000.0), Move::demand(500_000.0)];

        let rec = engine.recommend(&ctx, &moves).expect("recommendation");
        // 100k + 10k * 0.7 = 107k, cap 110k - 20k = 90k
        assert_eq!(rec.suggested_amount, 90_000.0);
    }

    #[test]
    fn test_plaintiff_floor_above_goal() {
        let engine = RecommendationEngine::new();
        let ctx = no_context().with_settlement_goal(400_000.0);
        let moves = vec![Move::demand(420_000.0), Move::offer(100_000.0)];

        let rec = engine.recommend(&ctx, &moves).expect("recommendation");
        // 420k - 20k * 0.7 = 406k, floor 400k + 16k = 416k
        assert_eq!(rec.suggested_amount, 416_000.0);
    }

    #[test]
    fn test_damping_halves_movement_when_gap_is_narrow() {
        let engine = RecommendationEngine::new();
        let moves = vec![Move::demand(110_000.0), Move::offer(100_000.0)];

        let decision = engine.decide(&no_context(), &moves).expect("decision");
        // gap ratio 0.1 < 0.15; undamped 110k - 5k * 0.7 = 106.5k, halved step = 108,250
        assert!(decision.damped);
        assert_eq!(decision.suggested_amount, 108_250.0);
    }

    #[test]
    fn test_momentum_scales_step() {
        let engine = RecommendationEngine::new();
        let moves = vec![
            Move::demand(250_000.0),
            Move::offer(75_000.0),
            Move::demand(200_000.0),
            Move::offer(120_000.0),
        ];

        let decision = engine.decide(&no_context(), &moves).expect("decision");
        // momentum 40 => adjustment 1.12; 200k - 40k * 0.784 = 168,640
        assert_eq!(decision.suggested_amount, 168_640.0);
        assert_eq!(
            engine.momentum_trend(decision.momentum),
            MomentumTrend::GoodConvergence
        );
    }

    #[test]
    fn test_momentum_trend_buckets() {
        let engine = RecommendationEngine::new();
        assert_eq!(engine.momentum_trend(5.1), MomentumTrend::GoodConvergence);
        assert_eq!(engine.momentum_trend(5.0), MomentumTrend::Steady);
        assert_eq!(engine.momentum_trend(-5.0), MomentumTrend::Steady);
        assert_eq!(engine.momentum_trend(-5.1), MomentumTrend::Diverging);
    }

    #[test]
    fn test_confidence_matches_analytics() {
        let engine = RecommendationEngine::new();
        let moves = vec![
            Move::demand(250_000.0),
            Move::offer(75_000.0),
            Move::demand(200_000.0),
            Move::offer(120_000.0),
        ];
        let rec = engine.recommend(&no_context(), &moves).expect("recommendation");
        assert_eq!(rec.confidence, AnalyticsEngine::new().confidence(&moves));
    }

    #[test]
    fn test_zero_last_offer_skips_damping() {
        let engine = RecommendationEngine::new();
        let moves = vec![Move::demand(50_000.0), Move::offer(0.0)];
        let decision = engine.decide(&no_context(), &moves).expect("decision");
        assert!(!decision.damped);
        assert!(decision.suggested_amount.is_finite());
    }
}
