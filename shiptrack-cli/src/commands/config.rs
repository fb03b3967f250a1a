//! Configuration management CLI commands.
//!
//! Provides `config init`, `config show`, and `config path`.

use clap::Subcommand;
use shiptrack::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file with defaults
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration settings
    Show,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { force } => run_init(force),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();

    if force {
        ConfigFile::default().save_to(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if ConfigFile::ensure_exists_at(&path)? {
        println!("Created configuration file at {}", path.display());
    } else {
        println!("Configuration file already exists at {}", path.display());
        println!("Use 'shiptrack config init --force' to reset it to defaults.");
    }
    Ok(())
}

/// Print every setting, grouped by section.
fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    println!();

    let tracking = &config.tracking;
    println!("[tracking]");
    println!("  api_url = {}", tracking.api_url);
    println!("  ttl_secs = {}", tracking.ttl_secs);
    println!("  batch_size = {}", tracking.batch_size);
    println!("  batch_delay_ms = {}", tracking.batch_delay_ms);
    println!("  max_batches_per_trigger = {}", tracking.max_batches_per_trigger);
    println!("  timeout_secs = {}", tracking.timeout_secs);
    println!();

    let refresh = &config.refresh;
    println!("[refresh]");
    println!("  enabled = {}", refresh.enabled);
    println!("  interval_secs = {}", refresh.interval_secs);
    println!("  backend_url = {}", refresh.backend_url);
    println!("  page_size = {}", refresh.page_size);
    println!("  max_pages = {}", refresh.max_pages);
    println!();

    println!("[projection]");
    println!("  jitter_degrees = {}", config.projection.jitter_degrees);
    println!("  seed = {}", config.projection.seed);
    println!();

    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

fn run_path() -> Result<(), CliError> {
    let path = config_file_path();
    if path.exists() {
        println!("{}", path.display());
    } else {
        println!("{} (not created, defaults in use)", path.display());
    }
    Ok(())
}
