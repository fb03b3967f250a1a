//! Shipment listing trait and HTTP implementation.
//!
//! The [`ShipmentListing`] trait abstracts over the backend that owns the
//! shipment records. The [`HttpShipmentListing`] implementation pages
//! through `GET {base_url}/shipments` via `reqwest`.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use super::error::ListingError;
use crate::shipment::{LifecycleStatus, ShipmentRecord};

/// Default HTTP timeout for one listing page.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Trait for listing shipments by status.
pub trait ShipmentListing: Send + Sync {
    /// Fetch one page of shipments with the given status.
    fn list_shipments(
        &self,
        status: LifecycleStatus,
        limit: usize,
        offset: usize,
    ) -> impl Future<Output = Result<Vec<ShipmentRecord>, ListingError>> + Send;
}

/// Listing bodies come either as a bare array or wrapped in `items`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Plain(Vec<ShipmentRecord>),
    Paged { items: Vec<ShipmentRecord> },
}

impl ListingBody {
    fn into_records(self) -> Vec<ShipmentRecord> {
        match self {
            ListingBody::Plain(records) | ListingBody::Paged { items: records } => records,
        }
    }
}

/// Listing client for the shipment backend's REST API.
pub struct HttpShipmentListing {
    http: reqwest::Client,
    base_url: String,
}

impl HttpShipmentListing {
    /// Create a listing client for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ListingError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| ListingError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn page_url(&self, status: LifecycleStatus, limit: usize, offset: usize) -> String {
        format!(
            "{}/shipments?status={}&limit={}&offset={}",
            self.base_url.trim_end_matches('/'),
            status.as_str(),
            limit,
            offset
        )
    }
}

impl ShipmentListing for HttpShipmentListing {
    async fn list_shipments(
        &self,
        status: LifecycleStatus,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<ShipmentRecord>, ListingError> {
        let response = self
            .http
            .get(self.page_url(status, limit, offset))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ListingError::UnexpectedStatus(response.status().as_u16()));
        }

        let bytes = response.bytes().await?;
        let records = parse_listing(&bytes)?;

        tracing::debug!(
            status = %status,
            offset,
            returned = records.len(),
            "Shipment page fetched"
        );

        Ok(records)
    }
}

/// Parse a listing response body.
pub fn parse_listing(body: &[u8]) -> Result<Vec<ShipmentRecord>, ListingError> {
    let body: ListingBody = serde_json::from_slice(body)?;
    Ok(body.into_records())
}
