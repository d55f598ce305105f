//! Bracket suggestion engine.
//!
//! A bracket is a paired plaintiff/defendant target range. The reference it
//! is positioned against is chosen by walking an ordered list of candidates
//! for the current move state and taking the first whose guard holds; the
//! chosen figures then go through a uniform post-processing pass (floor,
//! ordering repair, coverage-limit clamp, rounding).

use tracing::debug;

use super::analytics_engine::Sides;
use super::rationale::{render_bracket, BracketAdjustments, BracketFacts};
use crate::domain::models::{
    BracketAnchor, BracketConfig, BracketSuggestion, Move, MoveState, NegotiationContext,
};

/// Everything a bracket strategy may look at.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BracketInputs {
    /// Most recent demand
    pub last_demand: Option<f64>,
    /// Most recent offer
    pub last_offer: Option<f64>,
    /// Caller-supplied settlement goal
    pub settlement_goal: Option<f64>,
    /// Adjusted case value from the damages fields
    pub case_value: Option<f64>,
    /// Effective coverage limit
    pub limit: Option<f64>,
}

impl BracketInputs {
    /// Collect the inputs from a context and a move list.
    pub fn gather(context: &NegotiationContext, moves: &[Move]) -> Self {
        let sides = Sides::split(moves);
        Self {
            last_demand: sides.last_demand(),
            last_offer: sides.last_offer(),
            settlement_goal: context.settlement_goal,
            case_value: context.adjusted_case_value(),
            limit: context.coverage_limit(),
        }
    }

    /// Which sides have moved
    pub fn state(&self) -> MoveState {
        MoveState::classify(self.last_demand, self.last_offer)
    }
}

/// One entry of a priority cascade: an anchor and the predicate that lets it fire.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    /// Strategy this entry selects
    pub anchor: BracketAnchor,
    /// Whether the strategy applies to the inputs
    pub guard: fn(&BracketInputs) -> bool,
}

fn strictly_between(value: Option<f64>, low: Option<f64>, high: Option<f64>) -> bool {
    matches!((value, low, high), (Some(v), Some(lo), Some(hi)) if lo < v && v < hi)
}

fn below_demand(value: Option<f64>, inputs: &BracketInputs) -> bool {
    matches!((value, inputs.last_demand), (Some(v), Some(d)) if v < d)
}

fn above_offer(value: Option<f64>, inputs: &BracketInputs) -> bool {
    matches!((value, inputs.last_offer), (Some(v), Some(o)) if v > o)
}

fn evaluation_between(i: &BracketInputs) -> bool {
    strictly_between(i.case_value, i.last_offer, i.last_demand)
}

fn goal_between(i: &BracketInputs) -> bool {
    strictly_between(i.settlement_goal, i.last_offer, i.last_demand)
}

fn evaluation_below_demand(i: &BracketInputs) -> bool {
    below_demand(i.case_value, i)
}

fn goal_below_demand(i: &BracketInputs) -> bool {
    below_demand(i.settlement_goal, i)
}

fn evaluation_above_offer(i: &BracketInputs) -> bool {
    above_offer(i.case_value, i)
}

fn goal_above_offer(i: &BracketInputs) -> bool {
    above_offer(i.settlement_goal, i)
}

fn evaluation_positive(i: &BracketInputs) -> bool {
    i.case_value.is_some_and(|v| v > 0.0)
}

fn goal_present(i: &BracketInputs) -> bool {
    i.settlement_goal.is_some()
}

fn limit_present(i: &BracketInputs) -> bool {
    i.limit.is_some()
}

fn always(_: &BracketInputs) -> bool {
    true
}

const BOTH_SIDES: &[Candidate] = &[
    Candidate { anchor: BracketAnchor::Evaluation, guard: evaluation_between },
    Candidate { anchor: BracketAnchor::SettlementGoal, guard: goal_between },
    Candidate { anchor: BracketAnchor::Midpoint, guard: always },
];

const DEMAND_ONLY: &[Candidate] = &[
    Candidate { anchor: BracketAnchor::Evaluation, guard: evaluation_below_demand },
    Candidate { anchor: BracketAnchor::SettlementGoal, guard: goal_below_demand },
    Candidate { anchor: BracketAnchor::DemandRatio, guard: always },
];

const OFFER_ONLY: &[Candidate] = &[
    Candidate { anchor: BracketAnchor::Evaluation, guard: evaluation_above_offer },
    Candidate { anchor: BracketAnchor::SettlementGoal, guard: goal_above_offer },
    Candidate { anchor: BracketAnchor::OfferRatio, guard: always },
];

const NO_MOVES: &[Candidate] = &[
    Candidate { anchor: BracketAnchor::Evaluation, guard: evaluation_positive },
    Candidate { anchor: BracketAnchor::SettlementGoal, guard: goal_present },
    Candidate { anchor: BracketAnchor::PolicyLimit, guard: limit_present },
    Candidate { anchor: BracketAnchor::Fallback, guard: always },
];

/// Priority order of anchors for a move state, highest first.
pub fn cascade(state: MoveState) -> &'static [Candidate] {
    match state {
        MoveState::BothSides => BOTH_SIDES,
        MoveState::DemandOnly => DEMAND_ONLY,
        MoveState::OfferOnly => OFFER_ONLY,
        MoveState::NoMoves => NO_MOVES,
    }
}

/// Raw figures a strategy produced, before post-processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proposal {
    /// Plaintiff target
    pub plaintiff: f64,
    /// Defendant target
    pub defendant: f64,
    /// Evaluation range (low, high) when the evaluation anchored the bracket
    pub range: Option<(f64, f64)>,
}

/// Figures after floor, repair and clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Finalized {
    /// Final plaintiff target
    pub plaintiff: f64,
    /// Final defendant target
    pub defendant: f64,
    /// Which post-processing steps fired
    pub adjustments: BracketAdjustments,
}

/// Service suggesting a negotiating bracket.
#[derive(Debug, Clone, Default)]
pub struct BracketEngine {
    config: BracketConfig,
}

impl BracketEngine {
    /// Create an engine with the default multipliers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom multipliers
    pub fn with_config(config: BracketConfig) -> Self {
        Self { config }
    }

    /// First candidate of the state's cascade whose guard holds.
    pub fn select_anchor(&self, inputs: &BracketInputs) -> BracketAnchor {
        cascade(inputs.state())
            .iter()
            .find(|candidate| (candidate.guard)(inputs))
            .map_or(BracketAnchor::Fallback, |candidate| candidate.anchor)
    }

    /// Figures for an anchor. `None` if the anchor's reference is missing.
    pub fn propose(&self, anchor: BracketAnchor, inputs: &BracketInputs) -> Option<Proposal> {
        let cfg = &self.config;
        let pair = |plaintiff: f64, defendant: f64| Proposal {
            plaintiff,
            defendant,
            range: None,
        };

        let proposal = match anchor {
            BracketAnchor::Evaluation => {
                let value = inputs.case_value?;
                let low = (value * cfg.evaluation_low_ratio).round();
                let high = (value * cfg.evaluation_high_ratio).round();
                let cap = inputs.limit.unwrap_or(high);
                let defendant_ratio = match inputs.state() {
                    MoveState::OfferOnly => cfg.evaluation_offer_only_defendant_ratio,
                    _ => cfg.evaluation_defendant_ratio,
                };
                Proposal {
                    plaintiff: (high * cfg.evaluation_plaintiff_markup).round().min(cap),
                    defendant: (low * defendant_ratio).round(),
                    range: Some((low, high)),
                }
            }
            BracketAnchor::SettlementGoal => {
                let goal = inputs.settlement_goal?;
                let defendant = match inputs.last_offer {
                    Some(offer) => offer + (goal - offer) * cfg.goal_defendant_step,
                    None => goal * cfg.goal_defendant_ratio,
                };
                pair(
                    (goal * cfg.goal_plaintiff_markup).round(),
                    defendant.round(),
                )
            }
            BracketAnchor::Midpoint => {
                let demand = inputs.last_demand?;
                let offer = inputs.last_offer?;
                let gap = demand - offer;
                let mid = offer + gap / 2.0;
                pair(
                    (mid + gap * cfg.midpoint_spread).round(),
                    (mid - gap * cfg.midpoint_spread).round(),
                )
            }
            BracketAnchor::DemandRatio => {
                let demand = inputs.last_demand?;
                pair(
                    (demand * cfg.demand_only_plaintiff_ratio).round(),
                    (demand * cfg.demand_only_defendant_ratio).round(),
                )
            }
            BracketAnchor::OfferRatio => {
                let offer = inputs.last_offer?;
                pair(
                    (offer * cfg.offer_only_plaintiff_ratio).round(),
                    (offer * cfg.offer_only_defendant_ratio).round(),
                )
            }
            BracketAnchor::PolicyLimit => {
                let limit = inputs.limit?;
                pair(
                    (limit * cfg.limit_plaintiff_ratio).round(),
                    (limit * cfg.limit_defendant_ratio).round(),
                )
            }
            BracketAnchor::Fallback => pair(cfg.fallback_plaintiff_amount, cfg.fallback_defendant_amount),
        };
        Some(proposal)
    }

    /// Apply the floor and swap-and-rescale the pair if the defendant caught up.
    fn floor_and_order(&self, plaintiff: f64, defendant: f64) -> (f64, f64, bool) {
        let cfg = &self.config;
        let plaintiff = plaintiff.max(cfg.amount_floor);
        let defendant = defendant.max(cfg.amount_floor);

        if defendant >= plaintiff {
            let repaired_plaintiff = defendant * cfg.repair_plaintiff_multiplier;
            let repaired_defendant =
                (plaintiff * cfg.repair_defendant_multiplier).max(cfg.amount_floor);
            (repaired_plaintiff, repaired_defendant, true)
        } else {
            (plaintiff, defendant, false)
        }
    }

    /// Post-processing shared by every strategy.
    ///
    /// A coverage limit so small that 95% of it falls under the floor cannot
    /// satisfy both rules; the floor and ordering win and the result is
    /// flagged `limit_unsatisfiable` rather than `clamped_to_limit`.
    pub fn finalize(&self, plaintiff: f64, defendant: f64, limit: Option<f64>) -> Finalized {
        let cfg = &self.config;
        let (mut plaintiff, mut defendant, order_repaired) =
            self.floor_and_order(plaintiff, defendant);
        let mut adjustments = BracketAdjustments {
            order_repaired,
            ..BracketAdjustments::default()
        };

        if let Some(limit) = limit {
            if plaintiff > limit {
                plaintiff = (limit * cfg.limit_clamp_ratio).round();
                if defendant > plaintiff * cfg.limit_defendant_trigger_ratio {
                    defendant = (plaintiff * cfg.limit_defendant_clamp_ratio).round();
                }

                let (p, d, repaired) = self.floor_and_order(plaintiff, defendant);
                plaintiff = p.round();
                defendant = d;
                adjustments.order_repaired |= repaired;

                if plaintiff <= limit {
                    adjustments.clamped_to_limit = true;
                } else {
                    adjustments.limit_unsatisfiable = true;
                }
            }
        }

        debug_assert!(
            plaintiff.is_finite() && defendant.is_finite(),
            "non-finite bracket amounts"
        );

        Finalized {
            plaintiff: plaintiff.round(),
            defendant: defendant.round(),
            adjustments,
        }
    }

    /// Suggest a bracket. Always returns a result, even with no moves.
    pub fn suggest(&self, context: &NegotiationContext, moves: &[Move]) -> BracketSuggestion {
        let inputs = BracketInputs::gather(context, moves);
        let mut anchor = self.select_anchor(&inputs);
        let proposal = match self.propose(anchor, &inputs) {
            Some(proposal) => proposal,
            None => {
                anchor = BracketAnchor::Fallback;
                Proposal {
                    plaintiff: self.config.fallback_plaintiff_amount,
                    defendant: self.config.fallback_defendant_amount,
                    range: None,
                }
            }
        };

        let finalized = self.finalize(proposal.plaintiff, proposal.defendant, inputs.limit);

        let facts = BracketFacts {
            last_demand: inputs.last_demand,
            last_offer: inputs.last_offer,
            settlement_goal: inputs.settlement_goal,
            case_value: inputs.case_value,
            range: proposal.range,
            limit: inputs.limit,
            amount_floor: self.config.amount_floor,
        };
        let adjustments = finalized.adjustments;
        let reasoning = render_bracket(anchor, &facts, adjustments);

        debug!(
            state = ?inputs.state(),
            anchor = anchor.as_str(),
            plaintiff_amount = finalized.plaintiff,
            defendant_amount = finalized.defendant,
            clamped = adjustments.clamped_to_limit,
            limit_unsatisfiable = adjustments.limit_unsatisfiable,
            "computed bracket suggestion"
        );

        BracketSuggestion {
            plaintiff_amount: finalized.plaintiff,
            defendant_amount: finalized.defendant,
            reasoning,
            anchor,
            clamped_to_limit: adjustments.clamped_to_limit,
            limit_unsatisfiable: adjustments.limit_unsatisfiable,
            order_repaired: adjustments.order_repaired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> BracketEngine {
        BracketEngine::new()
    }

    fn evaluated(medical: f64) -> NegotiationContext {
        NegotiationContext::default().with_damages(Some(medical), None, None)
    }

    #[test]
    fn test_fallback_bracket() {
        let s = engine().suggest(&NegotiationContext::default(), &[]);
        assert_eq!(s.plaintiff_amount, 2_000_000.0);
        assert_eq!(s.defendant_amount, 750_000.0);
        assert_eq!(s.anchor, BracketAnchor::Fallback);
        assert!(!s.clamped_to_limit);
    }

    #[test]
    fn test_no_moves_policy_limit() {
        let ctx = NegotiationContext::default().with_policy_limit(1_000_000.0);
        let s = engine().suggest(&ctx, &[]);
        assert_eq!(s.anchor, BracketAnchor::PolicyLimit);
        assert_eq!(s.plaintiff_amount, 900_000.0);
        assert_eq!(s.defendant_amount, 500_000.0);
    }

    #[test]
    fn test_no_moves_goal_beats_limit() {
        let ctx = NegotiationContext::default()
            .with_settlement_goal(200_000.0)
            .with_policy_limit(1_000_000.0);
        let s = engine().suggest(&ctx, &[]);
        assert_eq!(s.anchor, BracketAnchor::SettlementGoal);
        assert_eq!(s.plaintiff_amount, 230_000.0);
        assert_eq!(s.defendant_amount, 120_000.0);
    }

    #[test]
    fn test_no_moves_evaluation_first() {
        let ctx = evaluated(100_000.0).with_settlement_goal(500_000.0);
        let s = engine().suggest(&ctx, &[]);
        // range 60k-90k, plaintiff capped at range high without a limit
        assert_eq!(s.anchor, BracketAnchor::Evaluation);
        assert_eq!(s.plaintiff_amount, 90_000.0);
        assert_eq!(s.defendant_amount, 54_000.0);
        assert!(s.reasoning.contains("$60,000 to $90,000"));
    }

    #[test]
    fn test_both_sides_evaluation_between() {
        let ctx = evaluated(300_000.0).with_policy_limit(1_000_000.0);
        let moves = vec![Move::demand(500_000.0), Move::offer(100_000.0)];
        let s = engine().suggest(&ctx, &moves);
        // range 180k-270k; plaintiff 297k under limit; defendant 162k
        assert_eq!(s.anchor, BracketAnchor::Evaluation);
        assert_eq!(s.plaintiff_amount, 297_000.0);
        assert_eq!(s.defendant_amount, 162_000.0);
    }

    #[test]
    fn test_both_sides_evaluation_outside_range_falls_to_goal() {
        let ctx = evaluated(50_000.0).with_settlement_goal(250_000.0);
        let moves = vec![Move::demand(500_000.0), Move::offer(100_000.0)];
        let s = engine().suggest(&ctx, &moves);
        assert_eq!(s.anchor, BracketAnchor::SettlementGoal);
        assert_eq!(s.plaintiff_amount, 287_500.0);
        // 100k + 150k * 0.6
        assert_eq!(s.defendant_amount, 190_000.0);
    }

    #[test]
    fn test_both_sides_goal_at_boundary_is_not_between() {
        let ctx = NegotiationContext::default().with_settlement_goal(100_000.0);
        let moves = vec![Move::demand(500_000.0), Move::offer(100_000.0)];
        assert_eq!(engine().suggest(&ctx, &moves).anchor, BracketAnchor::Midpoint);
    }

    #[test]
    fn test_both_sides_midpoint() {
        let moves = vec![Move::demand(500_000.0), Move::offer(100_000.0)];
        let s = engine().suggest(&NegotiationContext::default(), &moves);
        // midpoint 300k, spread 40k
        assert_eq!(s.anchor, BracketAnchor::Midpoint);
        assert_eq!(s.plaintiff_amount, 340_000.0);
        assert_eq!(s.defendant_amount, 260_000.0);
    }

    #[test]
    fn test_demand_only_ratio() {
        let moves = vec![Move::demand(400_000.0)];
        let s = engine().suggest(&NegotiationContext::default(), &moves);
        assert_eq!(s.anchor, BracketAnchor::DemandRatio);
        assert_eq!(s.plaintiff_amount, 340_000.0);
        assert_eq!(s.defendant_amount, 200_000.0);
    }

    #[test]
    fn test_demand_only_goal_above_demand_is_ignored() {
        let ctx = NegotiationContext::default().with_settlement_goal(500_000.0);
        let moves = vec![Move::demand(400_000.0)];
        assert_eq!(engine().suggest(&ctx, &moves).anchor, BracketAnchor::DemandRatio);
    }

    #[test]
    fn test_demand_only_goal() {
        let ctx = NegotiationContext::default().with_settlement_goal(200_000.0);
        let moves = vec![Move::demand(400_000.0)];
        let s = engine().suggest(&ctx, &moves);
        assert_eq!(s.anchor, BracketAnchor::SettlementGoal);
        assert_eq!(s.plaintiff_amount, 230_000.0);
        assert_eq!(s.defendant_amount, 120_000.0);
    }

    #[test]
    fn test_offer_only_ratio() {
        let moves = vec![Move::offer(100_000.0)];
        let s = engine().suggest(&NegotiationContext::default(), &moves);
        assert_eq!(s.anchor, BracketAnchor::OfferRatio);
        assert_eq!(s.plaintiff_amount, 250_000.0);
        assert_eq!(s.defendant_amount, 130_000.0);
    }

    #[test]
    fn test_offer_only_evaluation_uses_its_own_defendant_ratio() {
        let ctx = evaluated(500_000.0);
        let moves = vec![Move::offer(100_000.0)];
        let s = engine().suggest(&ctx, &moves);
        // range 300k-450k; defendant 300k * 0.8
        assert_eq!(s.anchor, BracketAnchor::Evaluation);
        assert_eq!(s.plaintiff_amount, 450_000.0);
        assert_eq!(s.defendant_amount, 240_000.0);
    }

    #[test]
    fn test_floor_applies() {
        let moves = vec![Move::demand(1_000.0)];
        let s = engine().suggest(&NegotiationContext::default(), &moves);
        // 850 and 500 both floored to 1000, then re-spread
        assert!(s.order_repaired);
        assert_eq!(s.plaintiff_amount, 1_500.0);
        assert_eq!(s.defendant_amount, 1_000.0);
    }

    #[test]
    fn test_order_repair_swaps_and_rescales() {
        // offer above demand inverts the midpoint spread
        let moves = vec![Move::demand(100_000.0), Move::offer(200_000.0)];
        let s = engine().suggest(&NegotiationContext::default(), &moves);
        // raw: plaintiff 140k, defendant 160k -> plaintiff 240k, defendant 98k
        assert!(s.order_repaired);
        assert_eq!(s.plaintiff_amount, 240_000.0);
        assert_eq!(s.defendant_amount, 98_000.0);
        assert!(s.reasoning.contains("re-spread"));
    }

    #[test]
    fn test_limit_clamp() {
        let ctx = NegotiationContext::default().with_policy_limit(250_000.0);
        let moves = vec![Move::demand(1_000_000.0), Move::offer(300_000.0)];
        let s = engine().suggest(&ctx, &moves);
        // raw: 720k / 580k; clamp plaintiff to 237,500, defendant to 142,500
        assert!(s.clamped_to_limit);
        assert_eq!(s.plaintiff_amount, 237_500.0);
        assert_eq!(s.defendant_amount, 142_500.0);
        assert!(s.reasoning.contains("clamped below the $250,000 policy limit"));
    }

    #[test]
    fn test_limit_clamp_keeps_low_defendant() {
        let ctx = NegotiationContext::default().with_policy_limit(300_000.0);
        let moves = vec![Move::demand(400_000.0)];
        let s = engine().suggest(&ctx, &moves);
        // raw 340k / 200k; plaintiff clamps to 285k, defendant exceeds 199.5k so clamps to 171k
        assert_eq!(s.plaintiff_amount, 285_000.0);
        assert_eq!(s.defendant_amount, 171_000.0);

        let moves = vec![Move::demand(350_000.0)];
        let s = engine().suggest(&ctx, &moves);
        // raw 297,500 / 175k; plaintiff under limit, untouched
        assert!(!s.clamped_to_limit);
        assert_eq!(s.plaintiff_amount, 297_500.0);
    }

    #[test]
    fn test_primary_coverage_limit_used_for_clamp() {
        let ctx = NegotiationContext::default()
            .with_policy_limit(5_000_000.0)
            .with_primary_coverage_limit(100_000.0);
        let s = engine().suggest(&ctx, &[]);
        assert_eq!(s.anchor, BracketAnchor::PolicyLimit);
        assert_eq!(s.plaintiff_amount, 90_000.0);
    }

    #[test]
    fn test_tiny_limit_keeps_floor_and_order() {
        let ctx = NegotiationContext::default().with_policy_limit(500.0);
        let s = engine().suggest(&ctx, &[Move::demand(10_000.0)]);
        assert!(s.defendant_amount >= 1_000.0);
        assert!(s.plaintiff_amount > s.defendant_amount);
        assert!(s.limit_unsatisfiable);
        assert!(!s.clamped_to_limit);
    }

    #[test]
    fn test_limit_below_floor_is_reported_not_claimed() {
        let ctx = NegotiationContext::default().with_policy_limit(1_050.0);
        let s = engine().suggest(&ctx, &[Move::demand(5_000.0)]);
        // 4250/2500 clamps to 998/599, the floor lifts both to 1000, repair re-spreads
        assert_eq!(s.plaintiff_amount, 1_500.0);
        assert_eq!(s.defendant_amount, 1_000.0);
        assert!(s.plaintiff_amount > 1_050.0);
        assert!(!s.clamped_to_limit);
        assert!(s.limit_unsatisfiable);
        assert!(!s.reasoning.contains("clamped below"));
        assert!(s.reasoning.contains("$1,050 policy limit cannot be honoured"));
    }

    #[test]
    fn test_clamp_flag_only_when_limit_holds() {
        let ctx = NegotiationContext::default().with_policy_limit(2_000.0);
        let s = engine().suggest(&ctx, &[Move::demand(5_000.0)]);
        // 4250/2500 clamps to 1900/1140
        assert!(s.clamped_to_limit);
        assert!(!s.limit_unsatisfiable);
        assert_eq!(s.plaintiff_amount, 1_900.0);
        assert_eq!(s.defendant_amount, 1_140.0);
    }

    #[test]
    fn test_select_anchor_follows_cascade() {
        let e = engine();
        let inputs = BracketInputs {
            last_demand: Some(500_000.0),
            last_offer: Some(100_000.0),
            settlement_goal: Some(250_000.0),
            case_value: Some(300_000.0),
            limit: None,
        };
        assert_eq!(e.select_anchor(&inputs), BracketAnchor::Evaluation);

        let inputs = BracketInputs {
            case_value: None,
            ..inputs
        };
        assert_eq!(e.select_anchor(&inputs), BracketAnchor::SettlementGoal);

        let inputs = BracketInputs {
            settlement_goal: None,
            ..inputs
        };
        assert_eq!(e.select_anchor(&inputs), BracketAnchor::Midpoint);
    }

    #[test]
    fn test_cascade_ends_with_unconditional_candidate() {
        for state in [
            MoveState::BothSides,
            MoveState::DemandOnly,
            MoveState::OfferOnly,
            MoveState::NoMoves,
        ] {
            let last = cascade(state).last().expect("non-empty cascade");
            assert!((last.guard)(&BracketInputs::default()));
        }
    }
}
