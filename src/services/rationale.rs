//! Rendering of rationale text.
//!
//! The engines decide numbers; these functions only turn an already-made
//! decision into a deterministic sentence.

use crate::domain::models::{BracketAnchor, MomentumTrend, RecommendationAnchor};

/// Format an amount as whole dollars with thousands separators, e.g. `$1,250,000`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Numbers behind a recommendation, as the rationale needs them.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationFacts {
    /// Absolute gap between the latest positions
    pub current_gap: f64,
    /// Latest offer, the base of the relative gap
    pub last_offer: f64,
    /// Momentum in percent
    pub momentum: f64,
    /// Momentum bucket
    pub trend: MomentumTrend,
    /// Goal or midpoint the step aimed at
    pub anchor: RecommendationAnchor,
    /// Whether the step was damped
    pub damped: bool,
}

/// Sentence describing the gap, the momentum and the anchor.
pub fn render_recommendation(facts: &RecommendationFacts) -> String {
    let mut text = format!("Current gap is {}", format_currency(facts.current_gap));
    if facts.last_offer > 0.0 {
        let relative = facts.current_gap / facts.last_offer * 100.0;
        text.push_str(&format!(" ({relative:.1}% of the last offer)"));
    }
    text.push_str(&format!(
        ". Momentum shows {} ({:.1}%).",
        facts.trend.as_str(),
        facts.momentum
    ));

    match facts.anchor {
        RecommendationAnchor::SettlementGoal(goal) => text.push_str(&format!(
            " Movement is anchored to the settlement goal of {}.",
            format_currency(goal)
        )),
        RecommendationAnchor::Midpoint(mid) => text.push_str(&format!(
            " No settlement goal is set, so movement is anchored to the midpoint of {}.",
            format_currency(mid)
        )),
    }

    if facts.damped {
        text.push_str(" The gap is narrow, so the step is halved to keep the closing move realistic.");
    }
    text
}

/// Inputs the bracket rationale names, by anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketFacts {
    /// Most recent demand
    pub last_demand: Option<f64>,
    /// Most recent offer
    pub last_offer: Option<f64>,
    /// Settlement goal
    pub settlement_goal: Option<f64>,
    /// Adjusted case value
    pub case_value: Option<f64>,
    /// Evaluation range, when the evaluation anchored
    pub range: Option<(f64, f64)>,
    /// Effective coverage limit
    pub limit: Option<f64>,
    /// Minimum bracket amount
    pub amount_floor: f64,
}

/// Post-processing steps that changed the proposed figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BracketAdjustments {
    /// Ordering repair fired
    pub order_repaired: bool,
    /// Plaintiff target was brought under the limit
    pub clamped_to_limit: bool,
    /// The floor kept the plaintiff target above the limit
    pub limit_unsatisfiable: bool,
}

/// Sentence naming the anchor, its figures and any adjustments.
pub fn render_bracket(
    anchor: BracketAnchor,
    facts: &BracketFacts,
    adjustments: BracketAdjustments,
) -> String {
    let money = |v: Option<f64>| format_currency(v.unwrap_or_default());

    let mut text = match anchor {
        BracketAnchor::Evaluation => {
            let (low, high) = facts.range.unwrap_or_default();
            format!(
                "Bracket anchored to the case evaluation: adjusted case value of {} supports a settlement range of {} to {}.",
                money(facts.case_value),
                format_currency(low),
                format_currency(high)
            )
        }
        BracketAnchor::SettlementGoal => match facts.last_offer {
            Some(offer) => format!(
                "Bracket anchored to the settlement goal of {} against the last offer of {}.",
                money(facts.settlement_goal),
                format_currency(offer)
            ),
            None => format!(
                "Bracket anchored to the settlement goal of {}.",
                money(facts.settlement_goal)
            ),
        },
        BracketAnchor::Midpoint => {
            let demand = facts.last_demand.unwrap_or_default();
            let offer = facts.last_offer.unwrap_or_default();
            format!(
                "Bracket anchored to the midpoint of {} between the last demand of {} and the last offer of {}.",
                format_currency(offer + (demand - offer) / 2.0),
                format_currency(demand),
                format_currency(offer)
            )
        }
        BracketAnchor::DemandRatio => format!(
            "Only a demand of {} is on the table; bracket set as fixed shares of the demand.",
            money(facts.last_demand)
        ),
        BracketAnchor::OfferRatio => format!(
            "Only an offer of {} is on the table; bracket set as fixed multiples of the offer.",
            money(facts.last_offer)
        ),
        BracketAnchor::PolicyLimit => format!(
            "No moves yet; bracket set as fixed shares of the {} policy limit.",
            money(facts.limit)
        ),
        BracketAnchor::Fallback => "No moves, case evaluation, settlement goal or policy limit available; using the default opening bracket.".to_string(),
    };

    if adjustments.order_repaired {
        text.push_str(" Targets were re-spread because the defendant target reached the plaintiff target.");
    }
    if adjustments.clamped_to_limit {
        text.push_str(&format!(
            " Plaintiff target clamped below the {} policy limit.",
            money(facts.limit)
        ));
    }
    if adjustments.limit_unsatisfiable {
        text.push_str(&format!(
            " The {} policy limit cannot be honoured: the {} minimum keeps the plaintiff target above it.",
            money(facts.limit),
            format_currency(facts.amount_floor)
        ));
    }
    text
}
