//! `track` command: one-shot lookup of tracking codes through the cache.

use clap::Args;
use shiptrack::tracking::FetchOutcome;

use super::common::print_json;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `shiptrack track`.
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Tracking codes to look up
    #[arg(required = true)]
    pub codes: Vec<String>,

    /// Print locations as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the track command.
///
/// Codes beyond one trigger's cap are fetched by repeated triggers, with
/// the cache's pacing between batches.
pub async fn run(runner: &CliRunner, args: TrackArgs) -> Result<(), CliError> {
    runner.log_startup("track");
    let cache = runner.create_cache()?;

    loop {
        match cache.ensure_fresh(&args.codes).await {
            FetchOutcome::Completed(report) => {
                tracing::info!(
                    found = report.found,
                    empty = report.empty,
                    failed = report.failed,
                    deferred = report.deferred,
                    "Tracking lookup pass finished"
                );
                if report.deferred == 0 {
                    break;
                }
                tokio::time::sleep(cache.config().batch_delay).await;
            }
            _ => break,
        }
    }

    if args.json {
        let locations: Vec<_> = args
            .codes
            .iter()
            .map(|code| (code.as_str(), cache.get_location(code.trim())))
            .collect();
        return print_json(&locations);
    }

    for code in &args.codes {
        match cache.get_location(code.trim()) {
            Some(location) => {
                println!("{}", code);
                println!("  Location: {}", location.city_state);
                if !location.description.is_empty() {
                    println!("  Event:    {} ({})", location.description, location.event_code);
                }
                if !location.timestamp_text.is_empty() {
                    println!("  When:     {}", location.timestamp_text);
                }
            }
            None => println!("{}\n  No usable tracking event", code),
        }
    }

    Ok(())
}
