//! The safe-action executor: the policy-bound incident pipeline.
//!
//! The executor enforces the execution model:
//!
//!   Audit → Policy gate (per action) → [ActionDispatcher::dispatch] → Decision record
//!
//! The gating invariant is absolute: `ActionDispatcher::dispatch()` is NEVER
//! called unless `PolicyEngine::evaluate()` returned `allowed` for that
//! action. A denial is a normal, recorded outcome — never an error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use shipguard_contracts::{
    action::{ActionOutcome, PolicyContext, SafeAction},
    audit::AuditResult,
    decision::{DecisionDraft, DecisionLogEntry, DecisionSummary},
    error::ShipguardResult,
};

use crate::traits::{ActionDispatcher, Auditor, DecisionStore, PolicyEngine, ShipmentStore};

/// Everything one end-to-end incident handling call produced.
#[derive(Debug, Clone)]
pub struct IncidentReport {
    pub audit_result: AuditResult,
    pub outcomes: Vec<ActionOutcome>,
    pub decision_log_id: String,
}

/// The central executor driving audit, policy gating, action execution, and
/// decision logging.
///
/// Owns the trusted components; holds shared handles to the shipment store
/// and the decision log so callers can observe the log independently.
pub struct IncidentExecutor {
    store: Arc<dyn ShipmentStore>,
    auditor: Box<dyn Auditor>,
    policy: Box<dyn PolicyEngine>,
    dispatcher: Box<dyn ActionDispatcher>,
    log: Arc<dyn DecisionStore>,
}

impl IncidentExecutor {
    pub fn new(
        store: Arc<dyn ShipmentStore>,
        auditor: Box<dyn Auditor>,
        policy: Box<dyn PolicyEngine>,
        dispatcher: Box<dyn ActionDispatcher>,
        log: Arc<dyn DecisionStore>,
    ) -> Self {
        Self {
            store,
            auditor,
            policy,
            dispatcher,
            log,
        }
    }

    /// Audit a shipment without executing anything.
    pub fn audit(
        &self,
        tracking_number: &str,
        reference_time: Option<DateTime<Utc>>,
    ) -> ShipguardResult<AuditResult> {
        self.auditor.audit(tracking_number, reference_time)
    }

    /// The most recent `limit` decision records, most-recent-first.
    pub fn last_decisions(&self, limit: usize) -> Vec<DecisionLogEntry> {
        self.log.last_n(limit)
    }

    /// Gate one candidate action through policy and execute it if allowed.
    ///
    /// Always returns an outcome; a denial is recorded with its reason and
    /// the rule that fired.
    pub fn execute_action(
        &self,
        action: SafeAction,
        audit: &AuditResult,
        vendor_delay_count: Option<u32>,
    ) -> ActionOutcome {
        let ctx = PolicyContext {
            audit,
            vendor_delay_count,
        };
        let check = self.policy.evaluate(action, &ctx);

        if check.allowed {
            debug!(
                action = action.as_str(),
                rule = %check.rule_evaluated,
                tracking_number = %audit.tracking_number,
                "policy allowed action, dispatching"
            );
            // The ONLY dispatch call site in the pipeline.
            self.dispatcher.dispatch(action, audit);
        } else {
            warn!(
                action = action.as_str(),
                rule = %check.rule_evaluated,
                reason = %check.reason,
                tracking_number = %audit.tracking_number,
                "policy denied action"
            );
        }

        ActionOutcome {
            action,
            requested: true,
            executed: check.allowed,
            denied: !check.allowed,
            denial_reason: (!check.allowed).then(|| check.reason.clone()),
            policy_check: check,
            timestamp: Utc::now(),
        }
    }

    /// Run the full incident pipeline for one shipment.
    ///
    /// # Pipeline
    ///
    /// 1. Resolve the reference instant once — the given value or now — and
    ///    use that same instant for the audit and for vendor repeat-offense
    ///    counting.
    /// 2. Audit the shipment. An unresolved tracking number propagates here,
    ///    before any policy evaluation and without a decision record.
    /// 3. Restrict the suggestions to the executable action kinds,
    ///    deduplicated in suggestion order.
    /// 4. Count the courier's shipments currently exhibiting a delay anomaly.
    /// 5. Gate and execute each candidate.
    /// 6. Append exactly one decision record summarizing everything.
    pub fn handle_incident(
        &self,
        tracking_number: &str,
        reference_time: Option<DateTime<Utc>>,
    ) -> ShipguardResult<IncidentReport> {
        let reference = reference_time.unwrap_or_else(Utc::now);

        let audit = self.auditor.audit(tracking_number, Some(reference))?;

        let mut candidates: Vec<SafeAction> = Vec::new();
        for suggested in &audit.suggested_actions {
            if let Some(action) = SafeAction::from_suggested(*suggested) {
                if !candidates.contains(&action) {
                    candidates.push(action);
                }
            }
        }

        let vendor_delay_count = self.vendor_delay_count(&audit.courier_code, reference);

        let mut outcomes: Vec<ActionOutcome> = Vec::with_capacity(candidates.len());
        let mut rules_evaluated: Vec<String> = Vec::new();
        for &action in &candidates {
            let outcome = self.execute_action(action, &audit, Some(vendor_delay_count));
            if !rules_evaluated.contains(&outcome.policy_check.rule_evaluated) {
                rules_evaluated.push(outcome.policy_check.rule_evaluated.clone());
            }
            outcomes.push(outcome);
        }

        let entry = self.log.append(DecisionDraft {
            tracking_number: audit.tracking_number.clone(),
            courier_code: audit.courier_code.clone(),
            audit: DecisionSummary::from(&audit),
            requested_actions: candidates,
            outcomes: outcomes.clone(),
            policy_rules_evaluated: rules_evaluated,
        })?;

        info!(
            decision_id = %entry.id,
            tracking_number = %audit.tracking_number,
            verdict = ?audit.verdict,
            executed = outcomes.iter().filter(|o| o.executed).count(),
            denied = outcomes.iter().filter(|o| o.denied).count(),
            "incident handled"
        );

        Ok(IncidentReport {
            audit_result: audit,
            outcomes,
            decision_log_id: entry.id,
        })
    }

    /// How many of the courier's shipments exhibit a delay anomaly at the
    /// given reference instant.
    fn vendor_delay_count(&self, courier_code: &str, reference: DateTime<Utc>) -> u32 {
        self.store
            .by_courier(courier_code)
            .iter()
            .filter(|s| self.auditor.has_delay_anomaly(s, reference))
            .count() as u32
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
