//! Infrastructure layer module
//!
//! This module contains the process-level adapters around the engines:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
