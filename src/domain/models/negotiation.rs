//! Negotiation domain model.
//!
//! A negotiation is an ordered sequence of monetary moves exchanged between
//! a plaintiff and a defendant, plus read-only case context the engines use
//! as anchors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of the table that made a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The claimant side
    Plaintiff,
    /// The defending side (usually an insurer)
    Defendant,
    /// A neutral relaying a number on behalf of one side
    Mediator,
}

impl Party {
    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaintiff => "plaintiff",
            Self::Defendant => "defendant",
            Self::Mediator => "mediator",
        }
    }

    /// Case-insensitive parse; `None` for unknown names
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plaintiff" => Some(Self::Plaintiff),
            "defendant" => Some(Self::Defendant),
            "mediator" => Some(Self::Mediator),
            _ => None,
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of monetary position a move puts on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    /// A plaintiff-style ask
    Demand,
    /// A defendant-style counter
    Offer,
}

impl MoveType {
    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Demand => "demand",
            Self::Offer => "offer",
        }
    }

    /// Case-insensitive parse; `None` for unknown names
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "demand" => Some(Self::Demand),
            "offer" => Some(Self::Offer),
            _ => None,
        }
    }

    /// The party that conventionally makes this kind of move.
    pub fn natural_party(&self) -> Party {
        match self {
            Self::Demand => Party::Plaintiff,
            Self::Offer => Party::Defendant,
        }
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable negotiating step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Generated when absent from the file
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Who put the number on the table
    pub party: Party,
    /// Demand or offer, independent of `party`
    #[serde(rename = "type")]
    pub move_type: MoveType,
    /// Monetary amount, non-negative
    pub amount: f64,
    /// When the move was made; files may leave it out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Free text, never read by the engines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Move {
    /// Create a move stamped with the current time.
    pub fn new(party: Party, move_type: MoveType, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            party,
            move_type,
            amount,
            timestamp: Some(Utc::now()),
            notes: None,
        }
    }

    /// Plaintiff demand.
    pub fn demand(amount: f64) -> Self {
        Self::new(Party::Plaintiff, MoveType::Demand, amount)
    }

    /// Defendant offer.
    pub fn offer(amount: f64) -> Self {
        Self::new(Party::Defendant, MoveType::Offer, amount)
    }

    /// Stamp the move with an explicit time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach free-text notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether this is a demand-type move
    pub fn is_demand(&self) -> bool {
        self.move_type == MoveType::Demand
    }

    /// Whether this is an offer-type move
    pub fn is_offer(&self) -> bool {
        self.move_type == MoveType::Offer
    }
}

/// Read-only advisory fields supplied alongside the moves.
///
/// Absence is meaningful: `None` means "unknown", while `Some(0.0)` is a
/// real (if unusual) value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NegotiationContext {
    /// Amount the caller hopes to settle at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_goal: Option<f64>,

    /// Primary coverage limit; takes precedence over `policy_limit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_coverage_limit: Option<f64>,

    /// Policy limit; used when no primary coverage limit is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_limit: Option<f64>,

    /// Medical expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_specials: Option<f64>,

    /// Lost wages and other economic losses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_damages: Option<f64>,

    /// Pain and suffering and other non-economic losses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_economic_damages: Option<f64>,

    /// Defendant's share of liability, 0-100. Treated as 100 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liability_percentage: Option<f64>,
}

impl NegotiationContext {
    /// Set the settlement goal
    pub fn with_settlement_goal(mut self, goal: f64) -> Self {
        self.settlement_goal = Some(goal);
        self
    }

    /// Set the policy limit
    pub fn with_policy_limit(mut self, limit: f64) -> Self {
        self.policy_limit = Some(limit);
        self
    }

    /// Set the primary coverage limit
    pub fn with_primary_coverage_limit(mut self, limit: f64) -> Self {
        self.primary_coverage_limit = Some(limit);
        self
    }

    /// Set all three damages fields at once
    pub fn with_damages(
        mut self,
        medical_specials: Option<f64>,
        economic_damages: Option<f64>,
        non_economic_damages: Option<f64>,
    ) -> Self {
        self.medical_specials = medical_specials;
        self.economic_damages = economic_damages;
        self.non_economic_damages = non_economic_damages;
        self
    }

    /// Set the defendant's liability share, 0-100
    pub fn with_liability_percentage(mut self, percentage: f64) -> Self {
        self.liability_percentage = Some(percentage);
        self
    }

    /// The ceiling the defendant's coverage puts on any recovery.
    pub fn coverage_limit(&self) -> Option<f64> {
        self.primary_coverage_limit.or(self.policy_limit)
    }

    /// Total damages scaled by liability share, rounded to whole units.
    ///
    /// `None` when no damages field is present or the total is not positive;
    /// in both cases the case has no usable evaluation.
    pub fn adjusted_case_value(&self) -> Option<f64> {
        let fields = [
            self.medical_specials,
            self.economic_damages,
            self.non_economic_damages,
        ];
        if fields.iter().all(Option::is_none) {
            return None;
        }

        let total: f64 = fields.iter().flatten().sum();
        if total <= 0.0 {
            return None;
        }

        let liability = self.liability_percentage.unwrap_or(100.0);
        Some((total * liability / 100.0).round())
    }
}

/// A negotiation as the surrounding record layer hands it over: an id, a
/// label, its context and the move history in ascending timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRecord {
    /// Generated when absent from the file
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Free-form label, e.g. the case caption
    #[serde(default)]
    pub title: String,

    /// Advisory case context
    #[serde(default)]
    pub context: NegotiationContext,

    /// Move history, oldest first
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl NegotiationRecord {
    /// Create a record with a fresh id
    pub fn new(title: impl Into<String>, context: NegotiationContext, moves: Vec<Move>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            context,
            moves,
        }
    }
}
