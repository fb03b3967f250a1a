//! Shipment lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stage of a shipment from pre-posting to delivery or cancellation.
///
/// Variant order is declaration order only; how far along a shipment is
/// comes from [`crate::route::progress_for_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleStatus {
    PrePosted,
    Posted,
    Collected,
    InTransit,
    OutForDelivery,
    AwaitingPickup,
    Delivered,
    Canceled,
}

/// Unknown status text.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown lifecycle status: '{0}'")]
pub struct ParseStatusError(pub String);

impl LifecycleStatus {
    /// All statuses, in declaration order.
    pub const ALL: [LifecycleStatus; 8] = [
        LifecycleStatus::PrePosted,
        LifecycleStatus::Posted,
        LifecycleStatus::Collected,
        LifecycleStatus::InTransit,
        LifecycleStatus::OutForDelivery,
        LifecycleStatus::AwaitingPickup,
        LifecycleStatus::Delivered,
        LifecycleStatus::Canceled,
    ];

    /// Wire name, as used by the backend (`IN_TRANSIT`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStatus::PrePosted => "PRE_POSTED",
            LifecycleStatus::Posted => "POSTED",
            LifecycleStatus::Collected => "COLLECTED",
            LifecycleStatus::InTransit => "IN_TRANSIT",
            LifecycleStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            LifecycleStatus::AwaitingPickup => "AWAITING_PICKUP",
            LifecycleStatus::Delivered => "DELIVERED",
            LifecycleStatus::Canceled => "CANCELED",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleStatus::PrePosted => "Pre-posted",
            LifecycleStatus::Posted => "Posted",
            LifecycleStatus::Collected => "Collected",
            LifecycleStatus::InTransit => "In transit",
            LifecycleStatus::OutForDelivery => "Out for delivery",
            LifecycleStatus::AwaitingPickup => "Awaiting pickup",
            LifecycleStatus::Delivered => "Delivered",
            LifecycleStatus::Canceled => "Canceled",
        }
    }

    /// Whether the shipment has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleStatus::Delivered | LifecycleStatus::Canceled)
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleStatus {
    type Err = ParseStatusError;

    /// Parses wire names case-insensitively; `-` and spaces count as `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_roundtrip_through_from_str() {
        for status in LifecycleStatus::ALL {
            assert_eq!(status.as_str().parse::<LifecycleStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("in transit".parse::<LifecycleStatus>(), Ok(LifecycleStatus::InTransit));
        assert_eq!("out-for-delivery".parse::<LifecycleStatus>(), Ok(LifecycleStatus::OutForDelivery));
        assert!("shipped".parse::<LifecycleStatus>().is_err());
    }

    #[test]
    fn test_serde_matches_wire_name() {
        let json = serde_json::to_string(&LifecycleStatus::AwaitingPickup).unwrap();
        assert_eq!(json, "\"AWAITING_PICKUP\"");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(LifecycleStatus::Delivered.is_terminal());
        assert!(LifecycleStatus::Canceled.is_terminal());
        assert!(!LifecycleStatus::InTransit.is_terminal());
    }
}
