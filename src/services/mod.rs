//! Negotiation engines.
//!
//! All three engines are pure: no I/O, no shared state, and repeated calls on
//! the same input return the same output.

pub mod analytics_engine;
pub mod bracket_engine;
pub mod move_validation;
pub mod rationale;
pub mod recommendation_engine;

pub use analytics_engine::{midpoint, AnalyticsEngine};
pub use bracket_engine::{cascade, BracketEngine, BracketInputs, Candidate};
pub use move_validation::{validate_context, validate_moves, validate_record};
pub use rationale::format_currency;
pub use recommendation_engine::{RecommendationDecision, RecommendationEngine};

use crate::domain::models::{
    AnalyticsSnapshot, BracketSuggestion, EngineConfig, Move, NegotiationContext, Recommendation,
};

/// Analytics snapshot with the default weights.
pub fn compute_analytics(moves: &[Move]) -> AnalyticsSnapshot {
    AnalyticsEngine::new().analyze(moves)
}

/// Next-move recommendation with the default step sizing.
pub fn compute_recommendation(
    context: &NegotiationContext,
    moves: &[Move],
) -> Option<Recommendation> {
    RecommendationEngine::new().recommend(context, moves)
}

/// Bracket suggestion with the default multipliers.
pub fn compute_bracket_suggestion(context: &NegotiationContext, moves: &[Move]) -> BracketSuggestion {
    BracketEngine::new().suggest(context, moves)
}

/// The three engines built from one configuration.
#[derive(Debug, Clone, Default)]
pub struct Engines {
    /// Analytics engine
    pub analytics: AnalyticsEngine,
    /// Recommendation engine sharing the analytics weights
    pub recommendation: RecommendationEngine,
    /// Bracket engine
    pub bracket: BracketEngine,
}

impl Engines {
    /// Build all three engines from the loaded engine tables.
    pub fn from_config(config: &EngineConfig) -> Self {
        let analytics = AnalyticsEngine::with_config(config.analytics.clone());
        Self {
            recommendation: RecommendationEngine::with_config(
                analytics.clone(),
                config.recommendation.clone(),
            ),
            bracket: BracketEngine::with_config(config.bracket.clone()),
            analytics,
        }
    }
}
