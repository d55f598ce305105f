//! `analyze` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{heading, money_opt, output, CommandOutput};
use crate::cli::{load_record, RecordArgs};
use crate::domain::models::AnalyticsSnapshot;
use crate::services::Engines;

#[derive(Debug, Serialize)]
pub struct AnalyticsOutput {
    pub negotiation_id: String,
    pub title: String,
    pub analytics: AnalyticsSnapshot,
}

/// Human-readable block for a snapshot, shared with `report`.
pub fn render_snapshot(snapshot: &AnalyticsSnapshot) -> String {
    [
        heading("Analytics"),
        format!("Status: {}", snapshot.status),
        format!(
            "Moves: {} ({} demands, {} offers)",
            snapshot.move_count, snapshot.demand_count, snapshot.offer_count
        ),
        format!("Midpoint: {}", money_opt(snapshot.midpoint)),
        format!("Current gap: {}", money_opt(snapshot.current_gap)),
        format!(
            "Momentum: {:.1}% (demand {:.1}%, offer {:.1}%)",
            snapshot.momentum, snapshot.demand_movement, snapshot.offer_movement
        ),
        format!("Convergence rate: {:.1}%", snapshot.convergence_rate),
        format!(
            "Midpoint of midpoints: {}",
            money_opt(snapshot.midpoint_of_midpoints)
        ),
        format!(
            "Predicted settlement: {}",
            money_opt(snapshot.predicted_settlement)
        ),
        format!("Confidence: {:.1}%", snapshot.confidence),
    ]
    .join("\n")
}

impl CommandOutput for AnalyticsOutput {
    fn to_human(&self) -> String {
        render_snapshot(&self.analytics)
    }
}

pub async fn execute(args: RecordArgs, engines: &Engines, json_mode: bool) -> Result<()> {
    let record = load_record(&args.file).await?;
    let analytics = engines.analytics.analyze(&record.moves);

    output(
        &AnalyticsOutput {
            negotiation_id: record.id.to_string(),
            title: record.title,
            analytics,
        },
        json_mode,
    );
    Ok(())
}
