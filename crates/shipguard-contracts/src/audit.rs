//! Audit verdict types and the audit result.

use serde::{Deserialize, Serialize};

use crate::action::SuggestedAction;
use crate::anomaly::DetectedAnomaly;

/// Timeliness of a shipment relative to its configured transit and delay
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTrack,
    Warning,
    Failed,
}

/// Overall risk classification of a shipment.
///
/// Ordered: `Low < Medium < High`, so threshold checks can compare directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The audit agent's top-level health judgment for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "OK")]
    Ok,
    Warning,
    Failed,
}

/// The full result of auditing one shipment at one reference instant.
///
/// Ephemeral: constructed per call and returned to the caller; only a
/// condensed summary is written to the decision log. Auditing the same
/// tracking number with the same reference time produces an identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub tracking_number: String,
    pub courier_code: String,
    pub verdict: Verdict,
    pub sla_status: SlaStatus,
    pub risk_level: RiskLevel,
    /// 0–100, derived from the detected anomalies' weight table.
    pub anomaly_score: u8,
    pub anomalies: Vec<DetectedAnomaly>,
    /// Human-readable summary. Purely descriptive — never used for control
    /// decisions.
    pub explanation: String,
    pub suggested_actions: Vec<SuggestedAction>,
    /// Version of the SLA configuration the audit was computed against.
    pub sla_config_version: String,
    /// Hours since the last tracking update. Absent for delivered shipments.
    pub delay_hours: Option<f64>,
}
