//! shiptrack CLI - Command-line interface
//!
//! Resolves shipment locations, samples routes, looks up tracking codes,
//! and runs the live projection loop.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::resolve::ResolveArgs;
use commands::route::RouteArgs;
use commands::track::TrackArgs;
use commands::watch::WatchArgs;
use error::CliError;
use runner::{CliRunner, RunnerOptions};

#[derive(Parser)]
#[command(name = "shiptrack")]
#[command(version, about = "Shipment tracking cache and route projection", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Mirror log output to stdout
    #[arg(long, global = true)]
    log_stdout: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a city/state to coordinates
    Resolve(ResolveArgs),

    /// Sample the route of a shipment between two places
    Route(RouteArgs),

    /// Look up the latest location of tracking codes
    Track(TrackArgs),

    /// Project shipments live, refreshing from the backend
    Watch(WatchArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        e.exit();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let options = RunnerOptions {
        debug: cli.debug,
        log_stdout: cli.log_stdout,
    };

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Route(args) => commands::route::run(args),
        Commands::Config { command } => commands::config::run(command),
        Commands::Track(args) => {
            let runner = CliRunner::new(options)?;
            commands::track::run(&runner, args).await
        }
        Commands::Watch(args) => {
            let runner = CliRunner::new(options)?;
            commands::watch::run(&runner, args).await
        }
    }
}
