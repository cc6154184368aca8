use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::memory::MemoryCluster;
use engine::{chain::run_chain, context::RunContext};
use std::{sync::Arc, time::Duration};
use tracing::{Level, error, info};

mod commands;
mod config;
mod error;
mod fixture;
mod output;

#[derive(Parser)]
#[command(
    name = "rehome",
    version = "0.1.0",
    about = "Copies tenant tables between wide-column clusters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { config } => plan(&config).await,
        Commands::Run {
            config,
            fixture,
            output,
        } => run(&config, &fixture, output.as_deref()).await,
    }
}

async fn plan(config_path: &str) -> Result<(), CliError> {
    let config = config::load(config_path).await?;
    for chain in config.resolve()? {
        chain.validate()?;
        output::print_plan(&chain);
    }
    Ok(())
}

async fn run(
    config_path: &str,
    fixture_path: &str,
    output_path: Option<&str>,
) -> Result<(), CliError> {
    let config = config::load(config_path).await?;
    let chains = config.resolve()?;
    let fixture = fixture::load(fixture_path).await?;

    let source = Arc::new(MemoryCluster::new());
    fixture::seed(&source, &fixture.source);
    let target = Arc::new(MemoryCluster::new());
    fixture::seed(&target, &fixture.target);

    let ctx = RunContext::new(source, target, config.exec_options());
    info!(run = %ctx.run_id(), chains = chains.len(), "starting run");
    for (name, values) in &config.seeds {
        ctx.keys.set(name, values.iter().cloned());
    }

    let deadline = Duration::from_secs(config.deadline_secs);
    let mut summaries = Vec::new();
    let mut aborted = 0usize;
    for chain in &chains {
        // One chain going down must not take the others with it.
        match run_chain(&ctx, chain, deadline).await {
            Ok(summary) => summaries.push(summary),
            Err(err) => {
                error!(chain = %chain.name, error = %err, "chain aborted");
                aborted += 1;
            }
        }
    }

    match output_path {
        Some(path) => output::write_report(&summaries, path).await?,
        None => output::print_report(&summaries),
    }

    if aborted > 0 {
        return Err(CliError::ChainsAborted(aborted));
    }
    Ok(())
}
