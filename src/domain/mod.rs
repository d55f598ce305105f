//! Domain layer for Negotiator
//!
//! This module contains the negotiation models and domain errors.

pub mod errors;
pub mod models;

pub use errors::{DomainError, DomainResult};
