//! Shipment and tracking-event types.
//!
//! A shipment's event sequence is the chain of custody: ordered by occurrence,
//! append-only, never rewritten after the fact. The audit core reads shipments
//! and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped checkpoint in a shipment's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// When the checkpoint occurred (UTC).
    pub checkpoint_time: DateTime<Utc>,

    /// Free-text carrier description of the event. Anomaly detection scans
    /// this field; it is never normalized or rewritten.
    pub tracking_detail: String,

    /// Facility or place name, when the carrier reported one.
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// ISO country code.
    pub country: Option<String>,
    pub country_name: Option<String>,
    pub zip: Option<String>,
}

/// Current lifecycle status of a shipment, as reported by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
}

impl ShipmentStatus {
    /// True when the shipment has reached its terminal delivered state.
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// A complete shipment with its immutable tracking timeline.
///
/// The tracking number is the stable identity; lookups match it exactly,
/// case-insensitively. Created by the external data source and read-only to
/// the audit core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: String,
    pub tracking_number: String,
    /// Lowercase courier/carrier code (e.g. "dhl", "ups", "fedex").
    pub courier_code: String,
    /// Shipment title/description. Contributes to temperature-sensitivity
    /// detection.
    pub title: Option<String>,
    /// ISO origin country code.
    pub origin_country: Option<String>,
    /// ISO destination country code.
    pub destination_country: Option<String>,
    pub last_status: ShipmentStatus,
    /// Ordered, append-only event sequence.
    #[serde(default)]
    pub events: Vec<TrackingEvent>,
}

impl Shipment {
    /// The earliest event in the timeline, if any.
    pub fn first_event(&self) -> Option<&TrackingEvent> {
        self.events.first()
    }

    /// The most recent event in the timeline, if any.
    pub fn last_event(&self) -> Option<&TrackingEvent> {
        self.events.last()
    }
}
