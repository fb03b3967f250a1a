//! Common utilities shared across CLI commands.

use std::path::Path;

use serde::Serialize;
use shiptrack::projector::ProjectedShipment;
use shiptrack::shipment::ShipmentRecord;

use crate::error::CliError;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::Output)?;
    println!("{}", json);
    Ok(())
}

/// Load shipment records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<ShipmentRecord>, CliError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: display.clone(),
        error,
    })?;
    serde_json::from_str(&content).map_err(|error| CliError::InvalidRecords {
        path: display,
        error,
    })
}

/// One-line summary of a projected shipment.
pub fn format_projection(projected: &ProjectedShipment) -> String {
    let mut line = format!(
        "{:<12} {:<16} {:>4.0}%  {}",
        projected.shipment_id,
        projected.status.label(),
        projected.progress * 100.0,
        projected.current_position
    );
    if let Some(location) = &projected.tracking_location {
        line.push_str(&format!("  [{}", location.city_state));
        if !location.timestamp_text.is_empty() {
            line.push_str(&format!(" @ {}", location.timestamp_text));
        }
        line.push(']');
    }
    line
}
