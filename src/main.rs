//! Negotiator CLI entry point.

use anyhow::Result;
use clap::Parser;

use negotiator::cli::commands::{analyze, bracket, history, init, recommend, report};
use negotiator::cli::{Cli, Commands};
use negotiator::domain::models::Config;
use negotiator::infrastructure::config::ConfigLoader;
use negotiator::infrastructure::logging::LoggerImpl;
use negotiator::services::Engines;

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => negotiator::cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => negotiator::cli::handle_error(err, cli.json),
    };

    let engines = Engines::from_config(&config.engine);

    let result = match cli.command {
        Commands::Init { force } => init::execute(force, cli.json).await,
        Commands::Analyze(args) => analyze::execute(args, &engines, cli.json).await,
        Commands::Recommend(args) => recommend::execute(args, &engines, cli.json).await,
        Commands::Bracket(args) => bracket::execute(args, &engines, cli.json).await,
        Commands::Report(args) => report::execute(args, &engines, cli.json).await,
        Commands::History(args) => history::execute(args, &engines, cli.json).await,
    };

    if let Err(err) = result {
        negotiator::cli::handle_error(err, cli.json);
    }
}
