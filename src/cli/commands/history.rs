//! `history` command: analytics replayed after each move.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

use crate::cli::output::{list_table, money_opt, output, render_list, CommandOutput};
use crate::cli::{load_record, RecordArgs};
use crate::domain::models::{AnalyticsSnapshot, Move};
use crate::services::{format_currency, Engines};

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "move")]
    pub trigger: Move,
    pub analytics: AnalyticsSnapshot,
}

#[derive(Debug, Serialize)]
pub struct HistoryOutput {
    pub negotiation_id: String,
    pub entries: Vec<HistoryEntry>,
}

impl CommandOutput for HistoryOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&[
            "#",
            "move",
            "amount",
            "status",
            "midpoint",
            "momentum",
            "convergence",
            "predicted",
            "confidence",
        ]);

        for (i, entry) in self.entries.iter().enumerate() {
            let a = &entry.analytics;
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(format!("{} {}", entry.trigger.party, entry.trigger.move_type)),
                Cell::new(format_currency(entry.trigger.amount)),
                Cell::new(a.status),
                Cell::new(money_opt(a.midpoint)),
                Cell::new(format!("{:.1}%", a.momentum)),
                Cell::new(format!("{:.1}%", a.convergence_rate)),
                Cell::new(money_opt(a.predicted_settlement)),
                Cell::new(format!("{:.1}%", a.confidence)),
            ]);
        }

        render_list("snapshot", &table, self.entries.len())
    }
}

pub async fn execute(args: RecordArgs, engines: &Engines, json_mode: bool) -> Result<()> {
    let record = load_record(&args.file).await?;
    let snapshots = engines.analytics.history(&record.moves);

    let entries = record
        .moves
        .into_iter()
        .zip(snapshots)
        .map(|(trigger, analytics)| HistoryEntry { trigger, analytics })
        .collect();

    output(
        &HistoryOutput {
            negotiation_id: record.id.to_string(),
            entries,
        },
        json_mode,
    );
    Ok(())
}
