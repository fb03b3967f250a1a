//! Shipment records as seen by the tracking engine.
//!
//! Records are owned by the listing backend; the engine only reads the
//! fields defined here and never creates or edits shipments.

mod status;

pub use status::{LifecycleStatus, ParseStatusError};

use serde::{Deserialize, Serialize};

/// Postal address fields used for geographic resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// City name, free text.
    #[serde(default)]
    pub city: Option<String>,
    /// State code (e.g. "SP") or state name.
    #[serde(default)]
    pub state: Option<String>,
}

impl Address {
    /// Create an address from city and state text.
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            state: Some(state.into()),
        }
    }
}

/// A shipment as returned by the listing backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    /// Backend identifier.
    pub id: String,

    /// Carrier tracking code, once the shipment has been posted.
    #[serde(default)]
    pub tracking_code: Option<String>,

    /// Current lifecycle status.
    pub status: LifecycleStatus,

    /// Sender address.
    #[serde(default)]
    pub origin: Address,

    /// Recipient address.
    #[serde(default)]
    pub destination: Address,
}

impl ShipmentRecord {
    /// Tracking code, ignoring blank values.
    pub fn tracking_code(&self) -> Option<&str> {
        self.tracking_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Whether this record is in transit (the only status the refresher polls).
    pub fn is_in_transit(&self) -> bool {
        self.status == LifecycleStatus::InTransit
    }
}
