//! Error taxonomy for the SHIPGUARD audit core.
//!
//! Two conditions are errors: an unresolved tracking number and a broken
//! configuration. A policy denial is neither — it is a normal, recorded
//! outcome carried in [`crate::action::ActionOutcome`]. No operation in the
//! core retries: shipment resolution is not transient, and a denial is
//! terminal for that action within that call.

use thiserror::Error;

/// The unified error type for the SHIPGUARD crates.
#[derive(Debug, Error)]
pub enum ShipguardError {
    /// The tracking number resolved to no shipment.
    ///
    /// Carries example valid identifiers so callers can recover without a
    /// second round trip. Translates to a 4xx at the HTTP layer.
    #[error(
        "shipment not found: '{tracking_number}'; known tracking numbers include: {}",
        .examples.join(", ")
    )]
    ShipmentNotFound {
        tracking_number: String,
        examples: Vec<String>,
    },

    /// The SLA configuration is missing or structurally invalid.
    ///
    /// Fatal at startup — never a per-request condition.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The decision log could not persist an entry.
    #[error("decision log write failed: {reason}")]
    LogWriteFailed { reason: String },
}

/// Convenience alias used throughout the SHIPGUARD crates.
pub type ShipguardResult<T> = Result<T, ShipguardError>;
