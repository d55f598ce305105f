//! `bracket` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{heading, output, CommandOutput};
use crate::cli::{load_record, RecordArgs};
use crate::domain::models::BracketSuggestion;
use crate::services::{format_currency, Engines};

#[derive(Debug, Serialize)]
pub struct BracketOutput {
    pub negotiation_id: String,
    pub bracket: BracketSuggestion,
}

pub fn render_bracket(bracket: &BracketSuggestion) -> String {
    [
        heading("Bracket"),
        format!(
            "Plaintiff {} / Defendant {}",
            format_currency(bracket.plaintiff_amount),
            format_currency(bracket.defendant_amount)
        ),
        format!("Anchor: {}", bracket.anchor.as_str()),
        bracket.reasoning.clone(),
    ]
    .join("\n")
}

impl CommandOutput for BracketOutput {
    fn to_human(&self) -> String {
        render_bracket(&self.bracket)
    }
}

pub async fn execute(args: RecordArgs, engines: &Engines, json_mode: bool) -> Result<()> {
    let record = load_record(&args.file).await?;
    let bracket = engines.bracket.suggest(&record.context, &record.moves);

    output(
        &BracketOutput {
            negotiation_id: record.id.to_string(),
            bracket,
        },
        json_mode,
    );
    Ok(())
}
