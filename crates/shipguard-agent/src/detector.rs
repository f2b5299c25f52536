//! Anomaly detection over a shipment's event timeline.
//!
//! `detect` is a pure function of its inputs. The reference instant is
//! injected by the caller — running the same scan twice with the same
//! arguments yields the same anomalies, which is what makes audits
//! reproducible and testable.
//!
//! Each rule is evaluated independently (one event may trigger several
//! anomaly kinds), and each kind contributes at most one anomaly record no
//! matter how many events match it.

use chrono::{DateTime, Utc};

use shipguard_contracts::{
    anomaly::{AnomalyType, DetectedAnomaly, Severity},
    shipment::{Shipment, TrackingEvent},
};
use shipguard_sla::DelayThresholds;

/// Hours elapsed since the shipment's last tracking update.
///
/// Returns 0 for delivered shipments and for shipments with no events; may
/// be negative when the reference instant predates the last event.
pub fn delay_hours(shipment: &Shipment, reference_time: DateTime<Utc>) -> f64 {
    if shipment.last_status.is_delivered() {
        return 0.0;
    }
    match shipment.last_event() {
        Some(last) => (reference_time - last.checkpoint_time).num_seconds() as f64 / 3600.0,
        None => 0.0,
    }
}

/// Whether the shipment exhibits a delay anomaly at the given instant.
pub fn has_delay_anomaly(
    shipment: &Shipment,
    reference_time: DateTime<Utc>,
    thresholds: &DelayThresholds,
) -> bool {
    !shipment.last_status.is_delivered()
        && !shipment.events.is_empty()
        && delay_hours(shipment, reference_time) > thresholds.warning_hours
}

/// Scan the timeline for delay, route-deviation, temperature, and
/// customs-delay signals.
pub fn detect(
    shipment: &Shipment,
    reference_time: DateTime<Utc>,
    thresholds: &DelayThresholds,
) -> Vec<DetectedAnomaly> {
    let mut anomalies = Vec::new();

    // Delay: no update beyond the warning threshold while not delivered.
    if !shipment.last_status.is_delivered() {
        if let Some(last) = shipment.last_event() {
            let hours = delay_hours(shipment, reference_time);
            if hours > thresholds.warning_hours {
                let severity = if hours >= thresholds.breach_hours {
                    Severity::High
                } else {
                    Severity::Medium
                };
                anomalies.push(DetectedAnomaly {
                    anomaly_type: AnomalyType::Delay,
                    severity,
                    description: format!("No tracking update for {} hours", hours.round() as i64),
                    timestamp: last.checkpoint_time,
                });
            }
        }
    }

    // Route deviation: the carrier reported a reroute anywhere in the
    // timeline.
    if let Some(event) = first_matching(&shipment.events, &["deviation", "rerouted"]) {
        anomalies.push(DetectedAnomaly {
            anomaly_type: AnomalyType::RouteDeviation,
            severity: Severity::Medium,
            description: "Unexpected route deviation detected".to_string(),
            timestamp: event.checkpoint_time,
        });
    }

    // Temperature / cold-chain breach.
    if let Some(event) = first_matching(&shipment.events, &["temperature", "cold chain"]) {
        anomalies.push(DetectedAnomaly {
            anomaly_type: AnomalyType::Temperature,
            severity: Severity::High,
            description: "Temperature/cold chain breach detected".to_string(),
            timestamp: event.checkpoint_time,
        });
    }

    // Customs delay: an event mentioning customs that also mentions a delay.
    if let Some(event) = shipment
        .events
        .iter()
        .filter(|e| detail_contains(e, "customs"))
        .find(|e| detail_contains(e, "delay"))
    {
        anomalies.push(DetectedAnomaly {
            anomaly_type: AnomalyType::CustomsDelay,
            severity: Severity::Medium,
            description: "Customs clearance delay".to_string(),
            timestamp: event.checkpoint_time,
        });
    }

    anomalies
}

/// Case-insensitive substring match against the event's free-text detail.
pub(crate) fn detail_contains(event: &TrackingEvent, needle: &str) -> bool {
    event.tracking_detail.to_lowercase().contains(needle)
}

/// The earliest event whose detail contains any of the needles.
fn first_matching<'e>(events: &'e [TrackingEvent], needles: &[&str]) -> Option<&'e TrackingEvent> {
    events
        .iter()
        .find(|e| needles.iter().any(|n| detail_contains(e, n)))
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use shipguard_contracts::shipment::ShipmentStatus;

    use super::*;

    fn thresholds() -> DelayThresholds {
        DelayThresholds {
            warning_hours: 24.0,
            breach_hours: 48.0,
            customer_visible_hours: 24.0,
        }
    }

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

    fn shipment(status: ShipmentStatus, events: Vec<TrackingEvent>) -> Shipment {
        Shipment {
            id: "ship-test".to_string(),
            tracking_number: "TEST-1".to_string(),
            courier_code: "tnt".to_string(),
            title: None,
            origin_country: Some("NL".to_string()),
            destination_country: Some("FR".to_string()),
            last_status: status,
            events,
        }
    }

    // ── Delay rule ────────────────────────────────────────────────────────────

    #[test]
    fn delay_raised_past_warning_threshold() {
        let s = shipment(
            ShipmentStatus::InTransit,
            vec![event("2024-01-10T09:00:00Z", "In transit")],
        );
        // 30 hours later: past warning (24h), short of breach (48h).
        let found = detect(&s, ts("2024-01-11T15:00:00Z"), &thresholds());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].anomaly_type, AnomalyType::Delay);
        assert_eq!(found[0].severity, Severity::Medium);
        assert!(found[0].description.contains("30 hours"));
        assert_eq!(found[0].timestamp, ts("2024-01-10T09:00:00Z"));
    }

    #[test]
    fn delay_is_high_severity_at_breach() {
        let s = shipment(
            ShipmentStatus::InTransit,
            vec![event("2024-01-10T09:00:00Z", "In transit")],
        );
        let found = detect(&s, ts("2024-01-12T09:00:00Z"), &thresholds());
        assert_eq!(found[0].severity, Severity::High);
    }

    #[test]
    fn delay_at_exactly_warning_threshold_is_not_raised() {
        let s = shipment(
            ShipmentStatus::InTransit,
            vec![event("2024-01-10T09:00:00Z", "In transit")],
        );
        // Exactly 24h: the rule requires strictly greater.
        let found = detect(&s, ts("2024-01-11T09:00:00Z"), &thresholds());
        assert!(found.is_empty());
    }

    #[test]
    fn delivered_shipments_never_raise_delay() {
        let s = shipment(
            ShipmentStatus::Delivered,
            vec![event("2024-01-10T09:00:00Z", "Delivered")],
        );
        let found = detect(&s, ts("2024-02-01T00:00:00Z"), &thresholds());
        assert!(found.is_empty());
        assert_eq!(delay_hours(&s, ts("2024-02-01T00:00:00Z")), 0.0);
    }

    #[test]
    fn empty_timeline_never_raises_delay() {
        let s = shipment(ShipmentStatus::InTransit, vec![]);
        assert!(detect(&s, ts("2024-02-01T00:00:00Z"), &thresholds()).is_empty());
        assert_eq!(delay_hours(&s, ts("2024-02-01T00:00:00Z")), 0.0);
    }

    // ── Text-signal rules ─────────────────────────────────────────────────────

    #[test]
    fn route_deviation_detected_case_insensitively() {
        let s = shipment(
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-10T09:00:00Z", "Picked up"),
                event("2024-01-11T09:00:00Z", "Unexpected route DEVIATION - rerouted"),
            ],
        );
        let found = detect(&s, ts("2024-01-11T10:00:00Z"), &thresholds());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].anomaly_type, AnomalyType::RouteDeviation);
        assert_eq!(found[0].severity, Severity::Medium);
    }

    #[test]
    fn repeated_matches_yield_one_anomaly_anchored_to_first() {
        let s = shipment(
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-10T09:00:00Z", "Package rerouted"),
                event("2024-01-11T09:00:00Z", "Route deviation continues"),
            ],
        );
        let found = detect(&s, ts("2024-01-12T00:00:00Z"), &thresholds());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].timestamp, ts("2024-01-10T09:00:00Z"));
    }

    #[test]
    fn temperature_breach_is_high_severity() {
        let s = shipment(
            ShipmentStatus::Delivered,
            vec![event("2024-01-10T09:00:00Z", "Cold chain breach detected")],
        );
        let found = detect(&s, ts("2024-01-11T00:00:00Z"), &thresholds());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].anomaly_type, AnomalyType::Temperature);
        assert_eq!(found[0].severity, Severity::High);
    }

    #[test]
    fn customs_requires_both_customs_and_delay() {
        let cleared = shipment(
            ShipmentStatus::Delivered,
            vec![event("2024-01-10T09:00:00Z", "Customs clearance completed")],
        );
        assert!(detect(&cleared, ts("2024-01-11T00:00:00Z"), &thresholds()).is_empty());

        let delayed = shipment(
            ShipmentStatus::Delivered,
            vec![
                event("2024-01-10T09:00:00Z", "Customs clearance delay"),
                event("2024-01-12T09:00:00Z", "Customs clearance completed"),
            ],
        );
        let found = detect(&delayed, ts("2024-01-13T00:00:00Z"), &thresholds());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].anomaly_type, AnomalyType::CustomsDelay);
        assert_eq!(found[0].timestamp, ts("2024-01-10T09:00:00Z"));
    }

    // ── Independence and purity ───────────────────────────────────────────────

    #[test]
    fn one_event_can_trigger_multiple_rules() {
        let s = shipment(
            ShipmentStatus::InTransit,
            vec![event(
                "2024-01-10T09:00:00Z",
                "Rerouted after temperature excursion",
            )],
        );
        let found = detect(&s, ts("2024-01-12T09:00:00Z"), &thresholds());
        let kinds: Vec<AnomalyType> = found.iter().map(|a| a.anomaly_type).collect();
        assert!(kinds.contains(&AnomalyType::Delay));
        assert!(kinds.contains(&AnomalyType::RouteDeviation));
        assert!(kinds.contains(&AnomalyType::Temperature));
    }

    #[test]
    fn detection_is_deterministic_for_fixed_inputs() {
        let s = shipment(
            ShipmentStatus::InTransit,
            vec![
                event("2024-01-10T09:00:00Z", "Customs clearance delay"),
                event("2024-01-11T09:00:00Z", "Package rerouted"),
            ],
        );
        let reference = ts("2024-01-14T09:00:00Z");
        let first = detect(&s, reference, &thresholds());
        let second = detect(&s, reference, &thresholds());
        assert_eq!(first, second);
    }

    #[test]
    fn has_delay_anomaly_tracks_the_delay_rule() {
        let s = shipment(
            ShipmentStatus::InTransit,
            vec![event("2024-01-10T09:00:00Z", "In transit")],
        );
        assert!(!has_delay_anomaly(&s, ts("2024-01-11T08:00:00Z"), &thresholds()));
        assert!(has_delay_anomaly(&s, ts("2024-01-11T10:00:00Z"), &thresholds()));
    }
}
