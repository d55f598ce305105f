//! Boundary validation for negotiation input.
//!
//! The engines assume clean input. These checks run where records enter the
//! process (the CLI loader, or any record layer embedding the crate) so bad
//! numbers fail fast instead of surfacing as NaN deep inside a computation.

use chrono::{DateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Move, NegotiationContext, NegotiationRecord};

fn check_amount(index: usize, amount: f64) -> DomainResult<()> {
    if !amount.is_finite() {
        return Err(DomainError::InvalidMove {
            index,
            reason: format!("amount {amount} is not a finite number"),
        });
    }
    if amount < 0.0 {
        return Err(DomainError::InvalidMove {
            index,
            reason: format!("amount {amount} is negative"),
        });
    }
    Ok(())
}

/// Amounts must be finite and non-negative; timestamps must not go backwards.
///
/// Moves without a timestamp keep their list position and are skipped by
/// the ordering check; each stamped move is compared with the latest stamp
/// before it.
pub fn validate_moves(moves: &[Move]) -> DomainResult<()> {
    for (index, mv) in moves.iter().enumerate() {
        check_amount(index, mv.amount)?;
    }

    let mut latest: Option<DateTime<Utc>> = None;
    for (index, mv) in moves.iter().enumerate() {
        let Some(stamp) = mv.timestamp else {
            continue;
        };
        if latest.is_some_and(|prev| stamp < prev) {
            return Err(DomainError::MovesOutOfOrder { index });
        }
        latest = Some(stamp);
    }
    Ok(())
}

/// Monetary fields must be finite and non-negative; liability must lie within 0-100.
pub fn validate_context(context: &NegotiationContext) -> DomainResult<()> {
    let monetary = [
        ("settlement_goal", context.settlement_goal),
        ("primary_coverage_limit", context.primary_coverage_limit),
        ("policy_limit", context.policy_limit),
        ("medical_specials", context.medical_specials),
        ("economic_damages", context.economic_damages),
        ("non_economic_damages", context.non_economic_damages),
    ];

    for (name, value) in monetary {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(DomainError::InvalidContext(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
    }

    if let Some(pct) = context.liability_percentage {
        if !(0.0..=100.0).contains(&pct) {
            return Err(DomainError::InvalidContext(format!(
                "liability_percentage must be between 0 and 100, got {pct}"
            )));
        }
    }
    Ok(())
}

/// Context checks followed by move checks.
pub fn validate_record(record: &NegotiationRecord) -> DomainResult<()> {
    validate_context(&record.context)?;
    validate_moves(&record.moves)
}
