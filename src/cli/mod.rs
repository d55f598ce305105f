//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, RecordArgs};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::domain::models::NegotiationRecord;
use crate::services::validate_record;

/// Parse a negotiation record, YAML for `.yaml`/`.yml` files and JSON otherwise.
pub fn parse_record(path: &Path, contents: &str) -> Result<NegotiationRecord> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "yaml" | "yml"));

    let record: NegotiationRecord = if is_yaml {
        serde_yaml::from_str(contents)
            .with_context(|| format!("Failed to parse YAML negotiation {}", path.display()))?
    } else {
        serde_json::from_str(contents)
            .with_context(|| format!("Failed to parse JSON negotiation {}", path.display()))?
    };

    validate_record(&record)
        .with_context(|| format!("Negotiation {} failed validation", path.display()))?;
    Ok(record)
}

/// Read, parse and validate a negotiation file.
pub async fn load_record(path: &Path) -> Result<NegotiationRecord> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let record = parse_record(path, &contents)?;

    info!(
        negotiation_id = %record.id,
        moves = record.moves.len(),
        path = %path.display(),
        "loaded negotiation"
    );
    Ok(record)
}

/// Print an error in the selected output mode and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        let body = serde_json::json!({ "error": err.to_string(), "causes": chain });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
