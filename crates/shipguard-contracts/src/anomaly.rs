//! Anomaly classification types.
//!
//! Anomaly kinds and severities are closed enums with associated weight
//! tables, so scoring can never fall back to a default weight for a
//! misspelled kind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kinds of anomaly the detector can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    /// No tracking update beyond the warning threshold while in transit.
    Delay,
    /// The carrier reported an unexpected route change.
    RouteDeviation,
    /// A temperature / cold-chain breach was reported.
    Temperature,
    /// Customs clearance is delayed.
    CustomsDelay,
}

impl AnomalyType {
    /// Score multiplier applied on top of the severity weight.
    pub fn weight(self) -> f64 {
        match self {
            Self::Delay => 1.0,
            Self::CustomsDelay => 1.1,
            Self::RouteDeviation => 1.2,
            Self::Temperature => 1.5,
        }
    }
}

/// Severity of a detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Base score contribution before the type multiplier.
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 20.0,
            Self::Medium => 50.0,
            Self::High => 80.0,
        }
    }
}

/// A single anomaly found in a shipment's event timeline.
///
/// Produced fresh on every audit call from the timeline and an injected
/// reference time — never cached, never persisted. Detecting twice with the
/// same inputs yields the same records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedAnomaly {
    #[serde(rename = "type")]
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    pub description: String,
    /// The event timestamp the anomaly is anchored to.
    pub timestamp: DateTime<Utc>,
}
