//! Decision-log record types.
//!
//! `DecisionLogEntry` is the immutable record of one end-to-end incident
//! handling call. Entries are created only through the decision log's append
//! operation, which assigns the id and timestamp; they are never mutated
//! afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::{ActionOutcome, SafeAction};
use crate::anomaly::AnomalyType;
use crate::audit::{AuditResult, RiskLevel, SlaStatus, Verdict};

/// A condensed audit result, sized for long-lived log storage.
///
/// The full anomaly records and explanation are dropped; only the
/// classification outputs survive into the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub verdict: Verdict,
    pub sla_status: SlaStatus,
    pub risk_level: RiskLevel,
    pub anomaly_score: u8,
    pub anomaly_types: Vec<AnomalyType>,
    pub delay_hours: Option<f64>,
}

impl From<&AuditResult> for DecisionSummary {
    fn from(audit: &AuditResult) -> Self {
        Self {
            verdict: audit.verdict,
            sla_status: audit.sla_status,
            risk_level: audit.risk_level,
            anomaly_score: audit.anomaly_score,
            anomaly_types: audit.anomalies.iter().map(|a| a.anomaly_type).collect(),
            delay_hours: audit.delay_hours,
        }
    }
}

/// A decision record before the log has assigned its id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDraft {
    pub tracking_number: String,
    pub courier_code: String,
    pub audit: DecisionSummary,
    pub requested_actions: Vec<SafeAction>,
    pub outcomes: Vec<ActionOutcome>,
    /// Distinct policy rule identifiers that fired, in first-seen order.
    pub policy_rules_evaluated: Vec<String>,
}

/// One sealed entry in the decision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    /// Monotonically increasing, process-unique identifier assigned by the
    /// log.
    pub id: String,
    /// When the log appended the entry (UTC).
    pub timestamp: DateTime<Utc>,
    pub tracking_number: String,
    pub courier_code: String,
    pub audit: DecisionSummary,
    pub requested_actions: Vec<SafeAction>,
    pub outcomes: Vec<ActionOutcome>,
    pub policy_rules_evaluated: Vec<String>,
}

impl DecisionLogEntry {
    /// Seal a draft with the id and timestamp the log assigned.
    ///
    /// The decision log is the only intended caller; entries constructed
    /// elsewhere are not part of any log's chain.
    pub fn seal(draft: DecisionDraft, id: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp,
            tracking_number: draft.tracking_number,
            courier_code: draft.courier_code,
            audit: draft.audit,
            requested_actions: draft.requested_actions,
            outcomes: draft.outcomes,
            policy_rules_evaluated: draft.policy_rules_evaluated,
        }
    }
}
