//! `resolve` command: city/state text to coordinates.

use clap::Args;
use shiptrack::geo::{parse_city_state, resolve_coordinates, resolve_location_text};

use crate::error::CliError;

/// Arguments for `shiptrack resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// City name (e.g. "São Paulo")
    #[arg(long)]
    pub city: Option<String>,

    /// State code or name (e.g. "SP")
    #[arg(long)]
    pub state: Option<String>,

    /// Tracking-event location text (e.g. "SAO PAULO / SP"); overrides --city/--state
    #[arg(long, conflicts_with_all = ["city", "state"])]
    pub text: Option<String>,
}

/// Run the resolve command.
pub fn run(args: ResolveArgs) -> Result<(), CliError> {
    let point = match &args.text {
        Some(text) => {
            let (city, state) = parse_city_state(text);
            println!("City:  {}", city.unwrap_or("-"));
            println!("State: {}", state.unwrap_or("-"));
            resolve_location_text(text)
        }
        None => resolve_coordinates(args.city.as_deref(), args.state.as_deref()),
    };

    println!("{}", point);
    Ok(())
}
