//! `route` command: sample the route of a hypothetical shipment.

use clap::Args;
use shiptrack::projector::{NoTracking, ProjectorConfig, ShipmentPositionProjector};
use shiptrack::shipment::{Address, LifecycleStatus, ShipmentRecord};

use super::common::print_json;
use crate::error::CliError;

/// Arguments for `shiptrack route`.
#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Origin city
    #[arg(long)]
    pub from_city: Option<String>,

    /// Origin state code or name
    #[arg(long)]
    pub from_state: Option<String>,

    /// Destination city
    #[arg(long)]
    pub to_city: Option<String>,

    /// Destination state code or name
    #[arg(long)]
    pub to_state: Option<String>,

    /// Lifecycle status, e.g. IN_TRANSIT or "in transit"
    #[arg(long, default_value = "IN_TRANSIT")]
    pub status: LifecycleStatus,

    /// Key used to derive marker jitter
    #[arg(long, default_value = "route")]
    pub id: String,

    /// Disable marker jitter
    #[arg(long)]
    pub no_jitter: bool,

    /// Print the full projection as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the route command.
pub fn run(args: RouteArgs) -> Result<(), CliError> {
    let record = ShipmentRecord {
        id: args.id,
        tracking_code: None,
        status: args.status,
        origin: Address {
            city: args.from_city,
            state: args.from_state,
        },
        destination: Address {
            city: args.to_city,
            state: args.to_state,
        },
    };

    let projector = if args.no_jitter {
        ShipmentPositionProjector::without_jitter()
    } else {
        ShipmentPositionProjector::new(ProjectorConfig::default())
    };
    let projected = projector.project_one(&record, &NoTracking);

    if args.json {
        return print_json(&projected);
    }

    println!("Status:      {} ({})", projected.status, projected.status.label());
    println!("Progress:    {:.0}%", projected.progress * 100.0);
    println!("Origin:      {}", projected.origin);
    println!("Destination: {}", projected.destination);
    println!("Position:    {}", projected.current_position);
    println!("Samples:     {}", projected.route_points.len());
    Ok(())
}
