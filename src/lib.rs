//! Negotiator - settlement negotiation trajectory analytics
//!
//! Tracks the demands and offers exchanged in a settlement negotiation and
//! derives quantitative signals from them: convergence trend, predicted
//! settlement, confidence, a recommended next move and a suggested
//! plaintiff/defendant bracket.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Negotiation models, configuration tables and errors
//! - **Service Layer** (`services`): The pure analytics, recommendation and bracket engines
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use negotiator::{compute_analytics, compute_bracket_suggestion, Move, NegotiationContext};
//!
//! let moves = vec![Move::demand(500_000.0), Move::offer(200_000.0)];
//! let snapshot = compute_analytics(&moves);
//! assert_eq!(snapshot.midpoint, Some(350_000.0));
//!
//! let bracket = compute_bracket_suggestion(&NegotiationContext::default(), &moves);
//! assert!(bracket.plaintiff_amount > bracket.defendant_amount);
//! ```

#[allow(missing_docs)]
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AnalyticsSnapshot, BracketAnchor, BracketSuggestion, Config, EngineConfig, Move, MoveType,
    NegotiationContext, NegotiationRecord, NegotiationStatus, Party, Recommendation,
};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    compute_analytics, compute_bracket_suggestion, compute_recommendation, AnalyticsEngine,
    BracketEngine, Engines, RecommendationEngine,
};
