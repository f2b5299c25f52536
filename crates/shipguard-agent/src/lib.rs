//! # shipguard-agent
//!
//! The heuristic half of the SHIPGUARD decision pipeline: a pure anomaly
//! detector over a shipment's event timeline, and the audit agent that turns
//! detected anomalies plus SLA configuration into a scored verdict with
//! suggested actions.
//!
//! Everything here is deterministic. The reference instant is always an
//! input — the detector never reads the clock, so audits are reproducible.
//! What the agent *suggests* carries no authority: each suggestion is
//! independently re-derived by the policy gate before anything executes.

pub mod agent;
pub mod detector;

pub use agent::AuditAgent;
