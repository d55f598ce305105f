//! `report` command: every engine output for one negotiation.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

use super::analyze::render_snapshot;
use super::bracket::render_bracket;
use super::recommend::render_recommendation;
use crate::cli::output::{heading, list_table, output, render_list, CommandOutput};
use crate::cli::{load_record, RecordArgs};
use crate::domain::models::{
    AnalyticsSnapshot, BracketSuggestion, Move, NegotiationRecord, Recommendation,
};
use crate::services::{format_currency, Engines};

#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub negotiation_id: String,
    pub title: String,
    pub moves: Vec<Move>,
    pub analytics: AnalyticsSnapshot,
    pub recommendation: Option<Recommendation>,
    pub bracket: BracketSuggestion,
}

impl ReportOutput {
    pub fn build(record: NegotiationRecord, engines: &Engines) -> Self {
        let analytics = engines.analytics.analyze(&record.moves);
        let recommendation = engines
            .recommendation
            .recommend(&record.context, &record.moves);
        let bracket = engines.bracket.suggest(&record.context, &record.moves);

        Self {
            negotiation_id: record.id.to_string(),
            title: record.title,
            moves: record.moves,
            analytics,
            recommendation,
            bracket,
        }
    }
}

fn render_moves(moves: &[Move]) -> String {
    let mut table = list_table(&["#", "when", "party", "type", "amount", "notes"]);
    for (i, mv) in moves.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(
                mv.timestamp
                    .map_or_else(String::new, |t| t.format("%Y-%m-%d %H:%M").to_string()),
            ),
            Cell::new(mv.party),
            Cell::new(mv.move_type),
            Cell::new(format_currency(mv.amount)),
            Cell::new(mv.notes.as_deref().unwrap_or("")),
        ]);
    }
    render_list("move", &table, moves.len())
}

impl CommandOutput for ReportOutput {
    fn to_human(&self) -> String {
        let title = if self.title.is_empty() {
            format!("Negotiation {}", self.negotiation_id)
        } else {
            self.title.clone()
        };

        [
            heading(&title),
            render_moves(&self.moves),
            String::new(),
            render_snapshot(&self.analytics),
            String::new(),
            render_recommendation(self.recommendation.as_ref()),
            String::new(),
            render_bracket(&self.bracket),
        ]
        .join("\n")
    }
}

pub async fn execute(args: RecordArgs, engines: &Engines, json_mode: bool) -> Result<()> {
    let record = load_record(&args.file).await?;
    output(&ReportOutput::build(record, engines), json_mode);
    Ok(())
}
