//! `recommend` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{heading, output, CommandOutput};
use crate::cli::{load_record, RecordArgs};
use crate::domain::models::Recommendation;
use crate::services::{format_currency, Engines};

#[derive(Debug, Serialize)]
pub struct RecommendationOutput {
    pub negotiation_id: String,
    pub recommendation: Option<Recommendation>,
}

pub fn render_recommendation(recommendation: Option<&Recommendation>) -> String {
    let Some(rec) = recommendation else {
        return format!(
            "{}\nNo recommendation yet: both a demand and an offer are needed.",
            heading("Recommendation")
        );
    };

    [
        heading("Recommendation"),
        format!(
            "Next move: {} {} of {}",
            rec.party,
            rec.move_type,
            format_currency(rec.suggested_amount)
        ),
        format!("Confidence: {:.1}%", rec.confidence),
        rec.reasoning.clone(),
    ]
    .join("\n")
}

impl CommandOutput for RecommendationOutput {
    fn to_human(&self) -> String {
        render_recommendation(self.recommendation.as_ref())
    }
}

pub async fn execute(args: RecordArgs, engines: &Engines, json_mode: bool) -> Result<()> {
    let record = load_record(&args.file).await?;
    let recommendation = engines
        .recommendation
        .recommend(&record.context, &record.moves);

    output(
        &RecommendationOutput {
            negotiation_id: record.id.to_string(),
            recommendation,
        },
        json_mode,
    );
    Ok(())
}
