//! `watch` command: live projection loop.
//!
//! Wires the full engine together:
//!
//! ```text
//! records.json ──► AutoRefreshController ──RecordsUpdate──┐
//!                        (TokioScheduler)                 ▼
//!                                              ShipmentPositionProjector ──► stdout
//!                                                         ▲
//! TrackingLocationCache ─────────────────CacheUpdate──────┘
//! ```
//!
//! Runs until Ctrl+C, then shuts both components down so no late result
//! is applied.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use shiptrack::projector::{codes_to_track, ShipmentPositionProjector};
use shiptrack::refresh::{AutoRefreshConfig, AutoRefreshController, RefreshOutcome, TokioScheduler};
use shiptrack::shipment::ShipmentRecord;
use shiptrack::tracking::{HttpTrackingLookup, TrackingLocationCache};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use super::common::{format_projection, load_records};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `shiptrack watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// JSON file with the initial shipment records
    #[arg(long)]
    pub file: PathBuf,

    /// Backend base URL (overrides [refresh] backend_url)
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Do not poll the backend; only track the records in the file
    #[arg(long)]
    pub no_refresh: bool,
}

/// Run the watch command.
pub async fn run(runner: &CliRunner, args: WatchArgs) -> Result<(), CliError> {
    runner.log_startup("watch");
    let config = runner.config();

    let records = load_records(&args.file)?;
    info!(records = records.len(), file = %args.file.display(), "Shipment records loaded");

    let cache = Arc::new(runner.create_cache()?);
    let projector = ShipmentPositionProjector::new((&config.projection).into());

    let mut refresh_config = AutoRefreshConfig::from(&config.refresh);
    if args.no_refresh {
        refresh_config.enabled = false;
    }
    let scheduler = Arc::new(TokioScheduler::new());
    let controller = Arc::new(AutoRefreshController::new(
        runner.create_listing(args.backend_url.as_deref())?,
        scheduler,
        refresh_config,
    ));
    controller.set_records(records);

    let mut record_updates = controller.subscribe();
    let mut cache_updates = cache.subscribe();
    controller.start();

    if !args.no_refresh {
        if let RefreshOutcome::Failed(error) = controller.refresh().await {
            println!("Initial refresh failed ({}), showing file contents", error);
        }
    }

    let print = |records: &[ShipmentRecord]| {
        print_projections(&projector, records, &cache);
    };

    let records = controller.records();
    print(&records);
    cache.spawn_ensure_fresh(codes_to_track(&records));

    println!("Watching {} shipments. Press Ctrl+C to stop.", records.len());

    loop {
        tokio::select! {
            update = record_updates.recv() => match update {
                Ok(update) => {
                    info!(replaced = update.summary.replaced, "Records refreshed");
                    let records = controller.records();
                    print(&records);
                    cache.spawn_ensure_fresh(codes_to_track(&records));
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Record updates lagged"),
                Err(RecvError::Closed) => break,
            },
            update = cache_updates.recv() => match update {
                Ok(_) => print(&controller.records()),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Cache updates lagged"),
                Err(RecvError::Closed) => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(CliError::Signal)?;
                println!();
                println!("Shutting down...");
                break;
            }
        }
    }

    controller.shutdown();
    cache.shutdown();
    info!("Watch stopped");
    Ok(())
}

fn print_projections(
    projector: &ShipmentPositionProjector,
    records: &[ShipmentRecord],
    cache: &TrackingLocationCache<HttpTrackingLookup>,
) {
    println!();
    for projected in projector.project(records, cache) {
        println!("{}", format_projection(&projected));
    }
}
