//! CLI command implementations.

pub mod analyze;
pub mod bracket;
pub mod history;
pub mod init;
pub mod recommend;
pub mod report;
