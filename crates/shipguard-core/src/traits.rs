//! Core trait definitions for the SHIPGUARD pipeline.
//!
//! These five traits define the complete seam set:
//!
//! - `ShipmentStore`    — the external tracking data source (read-only)
//! - `Auditor`          — deterministic health evaluation of one shipment
//! - `PolicyEngine`     — trusted gate, consulted before any side effect
//! - `ActionDispatcher` — the side-effecting action implementations
//! - `DecisionStore`    — append-only, bounded record of every incident call
//!
//! The executor wires them together. `ActionDispatcher::dispatch` is never
//! called unless the policy engine first allowed the action.

use chrono::{DateTime, Utc};

use shipguard_contracts::{
    action::{PolicyCheckResult, PolicyContext, SafeAction},
    audit::AuditResult,
    decision::{DecisionDraft, DecisionLogEntry},
    error::ShipguardResult,
    shipment::Shipment,
};

/// The external shipment data source.
///
/// The core treats resolution as a binary present/absent outcome; any
/// timeout or retry policy belongs to the implementation, not the core.
pub trait ShipmentStore: Send + Sync {
    /// Look up a shipment by tracking number. Exact match after trimming,
    /// case-insensitive.
    fn resolve(&self, tracking_number: &str) -> Option<Shipment>;

    /// All shipments for one courier code (case-insensitive). Used for
    /// vendor repeat-offense counting.
    fn by_courier(&self, courier_code: &str) -> Vec<Shipment>;

    /// Example valid tracking numbers, surfaced in not-found errors for
    /// self-service recovery.
    fn sample_tracking_numbers(&self) -> Vec<String>;
}

/// Deterministic shipment health evaluation.
///
/// Implementations must be pure apart from the store lookup: the same
/// tracking number and reference time yield an identical result, with no
/// hidden clock reads.
pub trait Auditor: Send + Sync {
    /// Audit one shipment at the given reference instant (`None` = now).
    ///
    /// Fails with `ShipmentNotFound` when the tracking number does not
    /// resolve.
    fn audit(
        &self,
        tracking_number: &str,
        reference_time: Option<DateTime<Utc>>,
    ) -> ShipguardResult<AuditResult>;

    /// Whether the shipment exhibits a delay anomaly at the given instant.
    ///
    /// Used by the executor to count a courier's currently-delayed shipments
    /// at the same reference instant as the audit.
    fn has_delay_anomaly(&self, shipment: &Shipment, reference_time: DateTime<Utc>) -> bool;
}

/// The policy gate: a deterministic, side-effect-free predicate set.
///
/// Suggested actions are never auto-trusted — every candidate is re-derived
/// from the context alone. Implementations must perform no lookups and no
/// I/O, and must populate `rule_evaluated` on every result, denials
/// included.
pub trait PolicyEngine: Send + Sync {
    fn evaluate(&self, action: SafeAction, ctx: &PolicyContext<'_>) -> PolicyCheckResult;
}

/// The side-effecting action implementations (ticketing, notifications).
///
/// The executor guarantees `dispatch` is only called for actions the policy
/// engine allowed.
pub trait ActionDispatcher: Send + Sync {
    fn dispatch(&self, action: SafeAction, audit: &AuditResult);
}

/// The append-only, bounded decision record.
///
/// Implementations own id and timestamp assignment, and must keep concurrent
/// appends from corrupting the FIFO bound or duplicating ids.
pub trait DecisionStore: Send + Sync {
    /// Seal and append one decision record, evicting the oldest entry once
    /// the capacity bound is exceeded.
    fn append(&self, draft: DecisionDraft) -> ShipguardResult<DecisionLogEntry>;

    /// The most recent `limit` entries, most-recent-first, clamped to what
    /// is available.
    fn last_n(&self, limit: usize) -> Vec<DecisionLogEntry>;
}
