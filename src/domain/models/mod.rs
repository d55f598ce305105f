//! Negotiation, engine output and configuration models.

pub mod analytics;
pub mod bracket;
pub mod config;
pub mod negotiation;
pub mod recommendation;

pub use analytics::{AnalyticsSnapshot, NegotiationStatus};
pub use bracket::{BracketAnchor, BracketSuggestion, MoveState};
pub use config::{
    AnalyticsConfig, BracketConfig, Config, EngineConfig, LoggingConfig, RecommendationConfig,
};
pub use negotiation::{Move, MoveType, NegotiationContext, NegotiationRecord, Party};
pub use recommendation::{MomentumTrend, Recommendation, RecommendationAnchor};
