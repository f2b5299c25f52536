//! The shipment audit agent.
//!
//! Answers: is this shipment healthy? If not, what's wrong, how risky is it,
//! and what should be done? The answer is deterministic for a given tracking
//! number and reference instant, and the suggested actions carry no
//! authority of their own — the policy gate re-derives each one before
//! anything executes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use shipguard_contracts::{
    action::SuggestedAction,
    anomaly::{AnomalyType, DetectedAnomaly, Severity},
    audit::{AuditResult, RiskLevel, SlaStatus, Verdict},
    error::{ShipguardError, ShipguardResult},
    shipment::Shipment,
};
use shipguard_core::traits::{Auditor, ShipmentStore};
use shipguard_sla::{DelayThresholds, SlaConfig};

use crate::detector;

/// Delivered shipments get this much headroom over the transit limit before
/// the SLA flips from warning to failed. Fixed; there is no config knob.
const DELIVERED_WARNING_MULTIPLIER: f64 = 1.25;

/// Anomaly score at or above which the shipment is high risk and the verdict
/// fails outright.
const SCORE_FAILURE_THRESHOLD: u8 = 70;

/// Anomaly score at or above which the shipment is at least medium risk.
const SCORE_WARNING_THRESHOLD: u8 = 40;

/// The audit agent: shipment store + SLA configuration in, scored verdict
/// out.
pub struct AuditAgent {
    store: Arc<dyn ShipmentStore>,
    config: SlaConfig,
}

impl AuditAgent {
    pub fn new(store: Arc<dyn ShipmentStore>, config: SlaConfig) -> Self {
        Self { store, config }
    }

    fn thresholds(&self) -> DelayThresholds {
        self.config.delay_thresholds()
    }
}

impl Auditor for AuditAgent {
    /// Audit one shipment at the given reference instant (`None` = now).
    ///
    /// # Errors
    ///
    /// `ShipmentNotFound` when the tracking number does not resolve — a hard
    /// failure carrying example identifiers, not a warning verdict.
    fn audit(
        &self,
        tracking_number: &str,
        reference_time: Option<DateTime<Utc>>,
    ) -> ShipguardResult<AuditResult> {
        let needle = tracking_number.trim();
        let shipment =
            self.store
                .resolve(needle)
                .ok_or_else(|| ShipguardError::ShipmentNotFound {
                    tracking_number: needle.to_string(),
                    examples: self.store.sample_tracking_numbers(),
                })?;

        let reference = reference_time.unwrap_or_else(Utc::now);
        let thresholds = self.thresholds();

        let temperature_sensitive = is_temperature_sensitive(&shipment);
        let max_transit_days = self.config.max_transit_days(
            &shipment.courier_code,
            shipment.origin_country.as_deref(),
            shipment.destination_country.as_deref(),
            temperature_sensitive,
        );

        let anomalies = detector::detect(&shipment, reference, &thresholds);
        let delay_hours = detector::delay_hours(&shipment, reference);

        let sla_status = compute_sla_status(&shipment, max_transit_days, delay_hours, &thresholds);
        let anomaly_score = compute_anomaly_score(&anomalies);
        let risk_level = compute_risk_level(&anomalies, anomaly_score);

        let verdict = if sla_status == SlaStatus::Failed
            || risk_level == RiskLevel::High
            || anomaly_score >= SCORE_FAILURE_THRESHOLD
        {
            Verdict::Failed
        } else if sla_status == SlaStatus::Warning
            || risk_level == RiskLevel::Medium
            || !anomalies.is_empty()
        {
            Verdict::Warning
        } else {
            Verdict::Ok
        };

        let suggested_actions = suggest_actions(risk_level, &anomalies);
        let explanation = build_explanation(verdict, sla_status, risk_level, &anomalies);

        debug!(
            tracking_number = %shipment.tracking_number,
            ?verdict,
            ?sla_status,
            ?risk_level,
            anomaly_score,
            anomaly_count = anomalies.len(),
            max_transit_days,
            temperature_sensitive,
            "shipment audited"
        );

        Ok(AuditResult {
            tracking_number: shipment.tracking_number.clone(),
            courier_code: shipment.courier_code.clone(),
            verdict,
            sla_status,
            risk_level,
            anomaly_score,
            anomalies,
            explanation,
            suggested_actions,
            sla_config_version: format!("v{}", self.config.version),
            delay_hours: (!shipment.last_status.is_delivered()).then_some(delay_hours),
        })
    }

    fn has_delay_anomaly(&self, shipment: &Shipment, reference_time: DateTime<Utc>) -> bool {
        detector::has_delay_anomaly(shipment, reference_time, &self.thresholds())
    }
}

/// Temperature sensitivity comes from the shipment title or from any event
/// mentioning temperature handling.
fn is_temperature_sensitive(shipment: &Shipment) -> bool {
    let title_flags = shipment
        .title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains("temperature"));

    title_flags
        || shipment.events.iter().any(|e| {
            detector::detail_contains(e, "temperature") || detector::detail_contains(e, "cold chain")
        })
}

/// Anomaly score in 0–100: the rounded mean of per-anomaly contributions
/// (severity weight × type multiplier), capped at 100. Zero with no
/// anomalies.
fn compute_anomaly_score(anomalies: &[DetectedAnomaly]) -> u8 {
    if anomalies.is_empty() {
        return 0;
    }

    let total: f64 = anomalies
        .iter()
        .map(|a| a.severity.weight() * a.anomaly_type.weight())
        .sum();
    let mean = total / anomalies.len() as f64;

    mean.round().min(100.0) as u8
}

/// Risk classification from the anomaly set and score.
fn compute_risk_level(anomalies: &[DetectedAnomaly], anomaly_score: u8) -> RiskLevel {
    if anomalies.is_empty() {
        return RiskLevel::Low;
    }

    let has_high = anomalies.iter().any(|a| a.severity == Severity::High);
    let has_temperature = anomalies
        .iter()
        .any(|a| a.anomaly_type == AnomalyType::Temperature);

    if has_high || has_temperature || anomaly_score >= SCORE_FAILURE_THRESHOLD {
        RiskLevel::High
    } else if anomalies.len() >= 2 || anomaly_score >= SCORE_WARNING_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// SLA status against the resolved transit limit.
///
/// Delivered shipments are judged on total transit duration; in-flight
/// shipments on hours since the last update.
fn compute_sla_status(
    shipment: &Shipment,
    max_transit_days: u32,
    delay_hours: f64,
    thresholds: &DelayThresholds,
) -> SlaStatus {
    if shipment.last_status.is_delivered() {
        let (Some(first), Some(last)) = (shipment.first_event(), shipment.last_event()) else {
            return SlaStatus::OnTrack;
        };
        let transit_days =
            (last.checkpoint_time - first.checkpoint_time).num_seconds() as f64 / 86_400.0;
        let max_days = f64::from(max_transit_days);

        if transit_days <= max_days {
            SlaStatus::OnTrack
        } else if transit_days <= max_days * DELIVERED_WARNING_MULTIPLIER {
            SlaStatus::Warning
        } else {
            SlaStatus::Failed
        }
    } else if delay_hours >= thresholds.breach_hours {
        SlaStatus::Failed
    } else if delay_hours >= thresholds.warning_hours {
        SlaStatus::Warning
    } else {
        SlaStatus::OnTrack
    }
}

/// Suggested next actions, deduplicated and order-stable.
fn suggest_actions(risk_level: RiskLevel, anomalies: &[DetectedAnomaly]) -> Vec<SuggestedAction> {
    let has = |t: AnomalyType| anomalies.iter().any(|a| a.anomaly_type == t);

    let mut actions = Vec::new();

    if risk_level == RiskLevel::High || has(AnomalyType::Temperature) {
        actions.push(SuggestedAction::CreateTicket);
    }
    if has(AnomalyType::Delay) && risk_level >= RiskLevel::Medium {
        actions.push(SuggestedAction::NotifyCustomer);
    }
    if has(AnomalyType::RouteDeviation)
        || has(AnomalyType::Temperature)
        || has(AnomalyType::CustomsDelay)
    {
        actions.push(SuggestedAction::NotifyVendor);
    }
    if actions.is_empty() {
        actions.push(SuggestedAction::Monitor);
    }

    actions
}

/// Human-readable summary. Descriptive only; nothing downstream branches on
/// this text.
fn build_explanation(
    verdict: Verdict,
    sla_status: SlaStatus,
    risk_level: RiskLevel,
    anomalies: &[DetectedAnomaly],
) -> String {
    let sla_text = match sla_status {
        SlaStatus::OnTrack => "on track",
        SlaStatus::Warning => "warning",
        SlaStatus::Failed => "failed",
    };
    let risk_text = match risk_level {
        RiskLevel::Low => "low",
        RiskLevel::Medium => "medium",
        RiskLevel::High => "high",
    };
    let verdict_text = match verdict {
        Verdict::Ok => "OK",
        Verdict::Warning => "Warning",
        Verdict::Failed => "Failed",
    };

    let mut parts = vec![format!(
        "Verdict: {verdict_text}. SLA status is {sla_text}, risk level is {risk_text}."
    )];

    if anomalies.is_empty() {
        parts.push("No anomalies detected. Shipment appears to be on track.".to_string());
    } else {
        let listing = anomalies
            .iter()
            .map(|a| {
                format!(
                    "{} ({})",
                    match a.anomaly_type {
                        AnomalyType::Delay => "delay",
                        AnomalyType::RouteDeviation => "route_deviation",
                        AnomalyType::Temperature => "temperature",
                        AnomalyType::CustomsDelay => "customs_delay",
                    },
                    match a.severity {
                        Severity::Low => "low",
                        Severity::Medium => "medium",
                        Severity::High => "high",
                    }
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Detected {} anomaly(ies): {listing}.", anomalies.len()));
    }

    parts.join(" ")
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use shipguard_contracts::shipment::{ShipmentStatus, TrackingEvent};
    use shipguard_sla::SlaConfigStore;

    use super::*;

    // ── Fixture helpers ───────────────────────────────────────────────────────

    fn ts(spec: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(spec)
            .expect("test timestamp must be valid RFC 3339")
            .with_timezone(&Utc)
    }

    fn event(time: &str, detail: &str) -> TrackingEvent {
        TrackingEvent {
            checkpoint_time: ts(time),
            tracking_detail: detail.to_string(),
            location: None,
            city: None,
            state: None,
            country: None,
            country_name: None,
            zip: None,
        }
    }

    fn anomaly(t: AnomalyType, s: Severity) -> DetectedAnomaly {
        DetectedAnomaly {
            anomaly_type: t,
            severity: s,
            description: "test".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
        }
    }

    fn shipment(
        tracking: &str,
        courier: &str,
        status: ShipmentStatus,
        events: Vec<TrackingEvent>,
    ) -> Shipment {
        Shipment {
            id: format!("ship-{tracking}"),
            tracking_number: tracking.to_string(),
            courier_code: courier.to_string(),
            title: None,
            origin_country: Some("US".to_string()),
            destination_country: Some("US".to_string()),
            last_status: status,
            events,
        }
    }

    /// A store over an arbitrary in-memory fleet.
    struct FleetStore {
        fleet: Vec<Shipment>,
    }

    impl ShipmentStore for FleetStore {
        fn resolve(&self, tracking_number: &str) -> Option<Shipment> {
            let needle = tracking_number.trim();
            self.fleet
                .iter()
                .find(|s| s.tracking_number.eq_ignore_ascii_case(needle))
                .cloned()
        }

        fn by_courier(&self, courier_code: &str) -> Vec<Shipment> {
            self.fleet
                .iter()
                .filter(|s| s.courier_code.eq_ignore_ascii_case(courier_code))
                .cloned()
                .collect()
        }

        fn sample_tracking_numbers(&self) -> Vec<String> {
            self.fleet.iter().map(|s| s.tracking_number.clone()).collect()
        }
    }

    fn agent_over(fleet: Vec<Shipment>) -> AuditAgent {
        AuditAgent::new(
            Arc::new(FleetStore { fleet }),
            SlaConfigStore::builtin().config().clone(),
        )
    }

    // ── Score ─────────────────────────────────────────────────────────────────

    #[test]
    fn score_is_zero_without_anomalies() {
        assert_eq!(compute_anomaly_score(&[]), 0);
    }

    #[test]
    fn score_is_weighted_mean() {
        // delay medium: 50 × 1.0 = 50; route medium: 50 × 1.2 = 60; mean 55.
        let score = compute_anomaly_score(&[
            anomaly(AnomalyType::Delay, Severity::Medium),
            anomaly(AnomalyType::RouteDeviation, Severity::Medium),
        ]);
        assert_eq!(score, 55);
    }

    #[test]
    fn score_caps_at_100() {
        // temperature high: 80 × 1.5 = 120, capped.
        let score = compute_anomaly_score(&[anomaly(AnomalyType::Temperature, Severity::High)]);
        assert_eq!(score, 100);
    }

    #[test]
    fn score_never_decreases_under_severity_upgrade() {
        for t in [
            AnomalyType::Delay,
            AnomalyType::RouteDeviation,
            AnomalyType::Temperature,
            AnomalyType::CustomsDelay,
        ] {
            let mut previous = 0;
            for s in [Severity::Low, Severity::Medium, Severity::High] {
                let score = compute_anomaly_score(&[anomaly(t, s)]);
                assert!(score >= previous, "{t:?} {s:?} scored {score} < {previous}");
                assert!(score <= 100);
                previous = score;
            }
        }
    }

    // ── Risk ──────────────────────────────────────────────────────────────────

    #[test]
    fn risk_is_low_without_anomalies() {
        assert_eq!(compute_risk_level(&[], 0), RiskLevel::Low);
    }

    #[test]
    fn any_high_severity_forces_high_risk() {
        let risk = compute_risk_level(&[anomaly(AnomalyType::Delay, Severity::High)], 0);
        assert_eq!(risk, RiskLevel::High);
    }

    #[test]
    fn temperature_forces_high_risk_regardless_of_score() {
        let risk = compute_risk_level(&[anomaly(AnomalyType::Temperature, Severity::Low)], 0);
        assert_eq!(risk, RiskLevel::High);
    }

    #[test]
    fn two_anomalies_are_at_least_medium_risk() {
        let risk = compute_risk_level(
            &[
                anomaly(AnomalyType::RouteDeviation, Severity::Low),
                anomaly(AnomalyType::CustomsDelay, Severity::Low),
            ],
            0,
        );
        assert_eq!(risk, RiskLevel::Medium);
    }

    #[test]
    fn single_low_anomaly_is_low_risk() {
        let risk = compute_risk_level(&[anomaly(AnomalyType::RouteDeviation, Severity::Low)], 24);
        assert_eq!(risk, RiskLevel::Low);
    }

    // ── SLA status ────────────────────────────────────────────────────────────

    #[test]
    fn delivered_within_limit_is_on_track() {
        let s = shipment(
            "D-1",
            "ups",
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-15T08:00:00Z", "Picked up"),
                event("2024-01-17T14:45:00Z", "Delivered"),
            ],
        );
        let t = SlaConfigStore::builtin().config().delay_thresholds();
        assert_eq!(compute_sla_status(&s, 4, 0.0, &t), SlaStatus::OnTrack);
    }

    #[test]
    fn delivered_sla_boundaries_use_the_warning_multiplier() {
        // Exactly 4 days of transit against a 4-day limit: on track.
        let exact = shipment(
            "D-2",
            "ups",
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-10T00:00:00Z", "Picked up"),
                event("2024-01-14T00:00:00Z", "Delivered"),
            ],
        );
        let t = SlaConfigStore::builtin().config().delay_thresholds();
        assert_eq!(compute_sla_status(&exact, 4, 0.0, &t), SlaStatus::OnTrack);

        // 5 days against 4 (1.25× = 5.0): still warning, not failed.
        let warning = shipment(
            "D-3",
            "ups",
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-10T00:00:00Z", "Picked up"),
                event("2024-01-15T00:00:00Z", "Delivered"),
            ],
        );
        assert_eq!(compute_sla_status(&warning, 4, 0.0, &t), SlaStatus::Warning);

        // Past the multiplier: failed.
        let failed = shipment(
            "D-4",
            "ups",
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-10T00:00:00Z", "Picked up"),
                event("2024-01-16T00:00:00Z", "Delivered"),
            ],
        );
        assert_eq!(compute_sla_status(&failed, 4, 0.0, &t), SlaStatus::Failed);
    }

    #[test]
    fn in_transit_sla_follows_delay_thresholds() {
        let s = shipment(
            "T-1",
            "tnt",
            ShipmentStatus::InTransit,
            vec![event("2024-01-10T09:00:00Z", "In transit")],
        );
        let t = SlaConfigStore::builtin().config().delay_thresholds();
        assert_eq!(compute_sla_status(&s, 5, 12.0, &t), SlaStatus::OnTrack);
        assert_eq!(compute_sla_status(&s, 5, 24.0, &t), SlaStatus::Warning);
        assert_eq!(compute_sla_status(&s, 5, 48.0, &t), SlaStatus::Failed);
    }

    // ── Suggested actions ─────────────────────────────────────────────────────

    #[test]
    fn quiet_shipment_suggests_monitor_only() {
        assert_eq!(
            suggest_actions(RiskLevel::Low, &[]),
            vec![SuggestedAction::Monitor]
        );
    }

    #[test]
    fn temperature_suggests_ticket_and_vendor() {
        let actions = suggest_actions(
            RiskLevel::High,
            &[anomaly(AnomalyType::Temperature, Severity::High)],
        );
        assert_eq!(
            actions,
            vec![SuggestedAction::CreateTicket, SuggestedAction::NotifyVendor]
        );
    }

    #[test]
    fn medium_risk_delay_suggests_customer_notification() {
        let actions = suggest_actions(
            RiskLevel::Medium,
            &[
                anomaly(AnomalyType::Delay, Severity::Medium),
                anomaly(AnomalyType::CustomsDelay, Severity::Medium),
            ],
        );
        assert_eq!(
            actions,
            vec![SuggestedAction::NotifyCustomer, SuggestedAction::NotifyVendor]
        );
    }

    #[test]
    fn low_risk_delay_does_not_notify_customer() {
        let actions = suggest_actions(
            RiskLevel::Low,
            &[anomaly(AnomalyType::Delay, Severity::Medium)],
        );
        assert_eq!(actions, vec![SuggestedAction::Monitor]);
    }

    // ── End-to-end audits ─────────────────────────────────────────────────────

    #[test]
    fn healthy_delivered_shipment_is_ok_with_monitor() {
        let agent = agent_over(vec![shipment(
            "1Z999AA10123456784",
            "ups",
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-15T08:00:00Z", "Picked up"),
                event("2024-01-17T14:45:00Z", "Delivered"),
            ],
        )]);

        let audit = agent
            .audit("1Z999AA10123456784", Some(ts("2024-02-01T00:00:00Z")))
            .unwrap();

        assert_eq!(audit.verdict, Verdict::Ok);
        assert_eq!(audit.sla_status, SlaStatus::OnTrack);
        assert_eq!(audit.risk_level, RiskLevel::Low);
        assert_eq!(audit.anomaly_score, 0);
        assert!(audit.anomalies.is_empty());
        assert_eq!(audit.suggested_actions, vec![SuggestedAction::Monitor]);
        assert_eq!(audit.delay_hours, None);
        assert_eq!(audit.sla_config_version, "v1.2.0");
    }

    #[test]
    fn unknown_tracking_number_is_a_hard_failure_with_examples() {
        let agent = agent_over(vec![shipment(
            "TNT123456789",
            "tnt",
            ShipmentStatus::InTransit,
            vec![event("2024-01-10T09:00:00Z", "In transit")],
        )]);

        let err = agent.audit("DOES-NOT-EXIST", None).unwrap_err();
        match err {
            ShipguardError::ShipmentNotFound {
                tracking_number,
                examples,
            } => {
                assert_eq!(tracking_number, "DOES-NOT-EXIST");
                assert_eq!(examples, vec!["TNT123456789".to_string()]);
            }
            other => panic!("expected ShipmentNotFound, got {other:?}"),
        }
    }

    #[test]
    fn lookup_trims_and_ignores_case() {
        let agent = agent_over(vec![shipment(
            "FX9876543210",
            "fedex",
            ShipmentStatus::InTransit,
            vec![event("2024-01-23T08:00:00Z", "Back on route")],
        )]);

        let audit = agent
            .audit("  fx9876543210  ", Some(ts("2024-01-23T10:00:00Z")))
            .unwrap();
        assert_eq!(audit.tracking_number, "FX9876543210");
    }

    #[test]
    fn title_flags_temperature_sensitivity() {
        let mut cold = shipment(
            "COLD-1",
            "usps",
            ShipmentStatus::InTransit,
            vec![event("2024-01-18T07:00:00Z", "Accepted at origin facility")],
        );
        cold.title = Some("Temperature-Sensitive Package".to_string());
        assert!(is_temperature_sensitive(&cold));

        let plain = shipment(
            "PLAIN-1",
            "usps",
            ShipmentStatus::InTransit,
            vec![event("2024-01-18T07:00:00Z", "Accepted at origin facility")],
        );
        assert!(!is_temperature_sensitive(&plain));
    }

    #[test]
    fn audit_is_idempotent_for_fixed_reference_time() {
        let agent = agent_over(vec![shipment(
            "TNT123456789",
            "tnt",
            ShipmentStatus::InTransit,
            vec![
                event("2024-01-08T14:00:00Z", "Arrived at transit facility"),
                event("2024-01-10T09:00:00Z", "In transit"),
            ],
        )]);

        let reference = ts("2024-01-13T09:00:00Z");
        let first = agent.audit("TNT123456789", Some(reference)).unwrap();
        let second = agent.audit("TNT123456789", Some(reference)).unwrap();
        assert_eq!(first, second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }

    #[test]
    fn breached_in_transit_shipment_fails_with_escalations() {
        let agent = agent_over(vec![shipment(
            "TNT123456789",
            "tnt",
            ShipmentStatus::Exception,
            vec![event("2024-01-10T09:00:00Z", "In transit - No update for 48+ hours")],
        )]);

        // 72 hours past the last event: breach threshold exceeded.
        let audit = agent
            .audit("TNT123456789", Some(ts("2024-01-13T09:00:00Z")))
            .unwrap();

        assert_eq!(audit.verdict, Verdict::Failed);
        assert_eq!(audit.sla_status, SlaStatus::Failed);
        assert_eq!(audit.risk_level, RiskLevel::High);
        assert_eq!(audit.delay_hours, Some(72.0));
        assert_eq!(
            audit.suggested_actions,
            vec![SuggestedAction::CreateTicket, SuggestedAction::NotifyCustomer]
        );
        assert!(audit.explanation.contains("Failed"));
        assert!(audit.explanation.contains("delay (high)"));
    }
}
