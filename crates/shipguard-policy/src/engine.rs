//! Per-action policy rules.
//!
//! Each action has its own ordered rule chain; the first branch whose
//! predicate holds produces the result, and every branch carries a distinct
//! `rule_evaluated` identifier so the decision log can name exactly which
//! rule fired — on denials too.

use tracing::{debug, warn};

use shipguard_contracts::action::{PolicyCheckResult, PolicyContext, SafeAction};
use shipguard_contracts::anomaly::AnomalyType;
use shipguard_contracts::audit::RiskLevel;
use shipguard_core::traits::PolicyEngine;
use shipguard_sla::DelayThresholds;

/// The SHIPGUARD action gate.
///
/// Constructed with the delay thresholds it judges against; holds no other
/// state and performs no lookups. Evaluation is a pure function of
/// `(action, context)`.
#[derive(Debug, Clone)]
pub struct SafeActionPolicy {
    thresholds: DelayThresholds,
}

impl SafeActionPolicy {
    pub fn new(thresholds: DelayThresholds) -> Self {
        Self { thresholds }
    }

    /// `create_ticket`: high risk, or an SLA breach combined with a
    /// delay/temperature anomaly.
    fn check_create_ticket(&self, ctx: &PolicyContext<'_>) -> PolicyCheckResult {
        let audit = ctx.audit;
        let delay_hours = audit.delay_hours.unwrap_or(0.0);
        let has_delay_or_temp = has_anomaly(ctx, AnomalyType::Delay)
            || has_anomaly(ctx, AnomalyType::Temperature);
        let sla_breach = delay_hours >= self.thresholds.breach_hours;

        if audit.risk_level == RiskLevel::High {
            return allow("Risk level is high", "create_ticket: risk_level=high");
        }

        if sla_breach && has_delay_or_temp {
            return allow(
                format!(
                    "SLA breach ({}h >= {}h) and delay/temperature anomaly",
                    delay_hours.round() as i64,
                    self.thresholds.breach_hours.round() as i64
                ),
                "create_ticket: sla_breach_and_delay_or_temperature",
            );
        }

        deny(
            "Ticket creation requires risk_level=high or an SLA breach with a delay/temperature anomaly",
            "create_ticket: policy_not_met",
        )
    }

    /// `notify_customer`: a customer-visible delay, or a delay anomaly with
    /// medium-or-higher risk. Route-only noise never reaches the customer.
    fn check_notify_customer(&self, ctx: &PolicyContext<'_>) -> PolicyCheckResult {
        let audit = ctx.audit;
        let delay_hours = audit.delay_hours.unwrap_or(0.0);
        let has_delay = has_anomaly(ctx, AnomalyType::Delay);

        if !has_delay && audit.risk_level == RiskLevel::Low {
            return deny(
                "Low-risk anomaly with no delay; no customer notification needed",
                "notify_customer: low_risk_no_delay",
            );
        }

        if delay_hours >= self.thresholds.customer_visible_hours {
            return allow(
                format!(
                    "Delay exceeds customer-visible threshold ({}h >= {}h)",
                    delay_hours.round() as i64,
                    self.thresholds.customer_visible_hours.round() as i64
                ),
                "notify_customer: customer_visible_breach",
            );
        }

        if has_delay && audit.risk_level >= RiskLevel::Medium {
            return allow(
                "Delay anomaly with medium/high risk",
                "notify_customer: delay_with_risk",
            );
        }

        deny(
            "Customer notification requires a customer-visible delay or a delay with medium+ risk",
            "notify_customer: policy_not_met",
        )
    }

    /// `notify_vendor`: route deviations, temperature issues, customs
    /// delays, and delays — with a dedicated branch for vendors whose fleet
    /// shows repeated delays.
    fn check_notify_vendor(&self, ctx: &PolicyContext<'_>) -> PolicyCheckResult {
        let vendor_delay_count = ctx.vendor_delay_count.unwrap_or(0);
        let has_delay = has_anomaly(ctx, AnomalyType::Delay);

        if has_anomaly(ctx, AnomalyType::RouteDeviation) {
            return allow("Route deviation detected", "notify_vendor: route_deviation");
        }

        if has_anomaly(ctx, AnomalyType::Temperature) {
            return allow("Temperature/cold chain issue", "notify_vendor: temperature");
        }

        if has_anomaly(ctx, AnomalyType::CustomsDelay) {
            return allow("Customs delay", "notify_vendor: customs_delay");
        }

        if has_delay && vendor_delay_count >= 2 {
            return allow(
                format!("Repeated delays from vendor ({vendor_delay_count} shipments with delay)"),
                "notify_vendor: repeated_delays",
            );
        }

        if has_delay {
            return allow(
                "Delay anomaly; vendor should be notified",
                "notify_vendor: delay",
            );
        }

        deny(
            "Vendor notification requires route deviation, temperature, customs, or delay anomalies",
            "notify_vendor: policy_not_met",
        )
    }
}

impl PolicyEngine for SafeActionPolicy {
    /// Evaluate one action against the context.
    ///
    /// The action set is a closed enum; the match below is exhaustive, so an
    /// unknown action kind cannot reach runtime.
    fn evaluate(&self, action: SafeAction, ctx: &PolicyContext<'_>) -> PolicyCheckResult {
        debug!(
            action = action.as_str(),
            tracking_number = %ctx.audit.tracking_number,
            risk = ?ctx.audit.risk_level,
            vendor_delay_count = ctx.vendor_delay_count,
            "evaluating action policy"
        );

        let result = match action {
            SafeAction::CreateTicket => self.check_create_ticket(ctx),
            SafeAction::NotifyCustomer => self.check_notify_customer(ctx),
            SafeAction::NotifyVendor => self.check_notify_vendor(ctx),
        };

        if !result.allowed {
            warn!(
                action = action.as_str(),
                rule = %result.rule_evaluated,
                tracking_number = %ctx.audit.tracking_number,
                "action denied"
            );
        }

        result
    }
}

fn has_anomaly(ctx: &PolicyContext<'_>, kind: AnomalyType) -> bool {
    ctx.audit.anomalies.iter().any(|a| a.anomaly_type == kind)
}

fn allow(reason: impl Into<String>, rule: &str) -> PolicyCheckResult {
    PolicyCheckResult {
        allowed: true,
        reason: reason.into(),
        rule_evaluated: rule.to_string(),
    }
}

fn deny(reason: impl Into<String>, rule: &str) -> PolicyCheckResult {
    PolicyCheckResult {
        allowed: false,
        reason: reason.into(),
        rule_evaluated: rule.to_string(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
