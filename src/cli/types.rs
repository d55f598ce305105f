//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "negotiator")]
#[command(about = "Negotiator - settlement negotiation analytics and positioning", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .negotiator/config.yaml plus NEGOTIATOR_* env vars)
    #[arg(short, long, global = true, env = "NEGOTIATOR_CONFIG")]
    pub config: Option<PathBuf>,
}

/// A negotiation file argument
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Negotiation file (JSON, or YAML when the extension is .yaml/.yml)
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the default configuration to .negotiator/config.yaml
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Compute the analytics snapshot for a negotiation
    Analyze(RecordArgs),

    /// Recommend the next move
    Recommend(RecordArgs),

    /// Suggest a plaintiff/defendant bracket
    Bracket(RecordArgs),

    /// Moves, analytics, recommendation and bracket in one view
    Report(RecordArgs),

    /// Replay analytics after every move
    History(RecordArgs),
}
