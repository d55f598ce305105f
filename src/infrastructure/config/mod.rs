//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Validation of logging settings and engine business-rule tables

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, CONFIG_DIR};
