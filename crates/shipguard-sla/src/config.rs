//! SLA configuration schema and threshold resolution.
//!
//! An `SlaConfig` is deserialized from TOML and never mutated afterwards.
//! All lookups are pure reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use shipguard_contracts::anomaly::Severity;

/// Workspace-wide transit and delay defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDefaults {
    pub max_transit_days_domestic: u32,
    pub max_transit_days_international: u32,
    pub warning_delay_hours: f64,
    pub breach_delay_hours: f64,
    pub customer_visible_delay_hours: f64,
}

/// Per-vendor transit-time override. Either figure may be omitted, in which
/// case the matching global default applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorOverride {
    #[serde(default)]
    pub max_transit_days_domestic: Option<u32>,
    #[serde(default)]
    pub max_transit_days_international: Option<u32>,
}

/// A transit-time limit for one origin→destination country pair.
///
/// Matching is an exact pair match on country codes, case-insensitive.
/// No partial or continent-level matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRule {
    pub origin: String,
    pub destination: String,
    pub max_transit_days: u32,
    #[serde(default)]
    pub label: Option<String>,
}

/// Hours of delay tolerated per anomaly severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllowedDelays {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl AllowedDelays {
    pub fn for_severity(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

/// Rules for temperature-sensitive cargo. When the cargo is flagged, the
/// transit limit here overrides every other source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRules {
    pub max_transit_days: u32,
    pub strict_temperature_breach: bool,
    pub auto_fail_on_breach: bool,
}

/// Delay thresholds in hours, projected from the global defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayThresholds {
    pub warning_hours: f64,
    pub breach_hours: f64,
    pub customer_visible_hours: f64,
}

/// The versioned SLA configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaConfig {
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub global_defaults: GlobalDefaults,
    /// Keyed by lowercase courier code.
    #[serde(default)]
    pub vendor_overrides: BTreeMap<String, VendorOverride>,
    #[serde(default)]
    pub route_rules: Vec<RouteRule>,
    pub allowed_delays_by_severity: AllowedDelays,
    pub temperature_sensitive_rules: TemperatureRules,
}

impl SlaConfig {
    /// Resolve the maximum transit days for a shipment.
    ///
    /// Precedence: temperature rule, then route rule, then vendor override,
    /// then global default. Domestic vs international is decided by whether
    /// origin and destination differ; a shipment missing either country code
    /// is treated as domestic.
    pub fn max_transit_days(
        &self,
        vendor: &str,
        origin_country: Option<&str>,
        destination_country: Option<&str>,
        temperature_sensitive: bool,
    ) -> u32 {
        if temperature_sensitive {
            debug!(
                vendor,
                max_days = self.temperature_sensitive_rules.max_transit_days,
                "temperature-sensitive transit limit applied"
            );
            return self.temperature_sensitive_rules.max_transit_days;
        }

        if let (Some(origin), Some(destination)) = (origin_country, destination_country) {
            if let Some(rule) = self.route_rules.iter().find(|r| {
                r.origin.eq_ignore_ascii_case(origin)
                    && r.destination.eq_ignore_ascii_case(destination)
            }) {
                debug!(
                    vendor,
                    origin,
                    destination,
                    max_days = rule.max_transit_days,
                    "route rule matched"
                );
                return rule.max_transit_days;
            }
        }

        let international = matches!(
            (origin_country, destination_country),
            (Some(o), Some(d)) if !o.eq_ignore_ascii_case(d)
        );

        if let Some(over) = self.vendor_overrides.get(&vendor.to_lowercase()) {
            // An override that omits the needed figure falls back to the
            // matching global default.
            return if international {
                over.max_transit_days_international
                    .unwrap_or(self.global_defaults.max_transit_days_international)
            } else {
                over.max_transit_days_domestic
                    .unwrap_or(self.global_defaults.max_transit_days_domestic)
            };
        }

        if international {
            self.global_defaults.max_transit_days_international
        } else {
            self.global_defaults.max_transit_days_domestic
        }
    }

    /// Project the delay thresholds from the global defaults.
    pub fn delay_thresholds(&self) -> DelayThresholds {
        DelayThresholds {
            warning_hours: self.global_defaults.warning_delay_hours,
            breach_hours: self.global_defaults.breach_delay_hours,
            customer_visible_hours: self.global_defaults.customer_visible_delay_hours,
        }
    }

    /// Hours of delay tolerated for the given severity.
    pub fn allowed_delay_hours(&self, severity: Severity) -> f64 {
        self.allowed_delays_by_severity.for_severity(severity)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SlaConfigStore;

    fn config() -> SlaConfig {
        SlaConfigStore::builtin().config().clone()
    }

    #[test]
    fn temperature_rule_overrides_everything() {
        let cfg = config();
        // Even on a route with its own rule and a vendor with overrides.
        let days = cfg.max_transit_days("dhl", Some("GB"), Some("US"), true);
        assert_eq!(days, cfg.temperature_sensitive_rules.max_transit_days);
    }

    #[test]
    fn route_rule_beats_vendor_override() {
        let cfg = config();
        // dhl has an international override, but GB→US has a route rule.
        let days = cfg.max_transit_days("dhl", Some("GB"), Some("US"), false);
        assert_eq!(days, 7);
    }

    #[test]
    fn route_match_is_case_insensitive_exact_pair() {
        let cfg = config();
        assert_eq!(cfg.max_transit_days("dhl", Some("gb"), Some("us"), false), 7);
        // Reversed pair is not a match.
        let reversed = cfg.max_transit_days("dhl", Some("US"), Some("GB"), false);
        assert_ne!(reversed, 7);
    }

    #[test]
    fn vendor_override_selects_domestic_figure() {
        let cfg = config();
        assert_eq!(cfg.max_transit_days("ups", Some("US"), Some("US"), false), 4);
        assert_eq!(cfg.max_transit_days("fedex", Some("US"), Some("US"), false), 3);
    }

    #[test]
    fn vendor_override_missing_figure_falls_back_to_global() {
        let cfg = config();
        // ups only overrides the domestic figure; international falls back.
        let days = cfg.max_transit_days("ups", Some("US"), Some("JP"), false);
        assert_eq!(days, cfg.global_defaults.max_transit_days_international);
    }

    #[test]
    fn unknown_vendor_uses_global_defaults() {
        let cfg = config();
        assert_eq!(
            cfg.max_transit_days("aramex", Some("US"), Some("US"), false),
            cfg.global_defaults.max_transit_days_domestic
        );
        assert_eq!(
            cfg.max_transit_days("aramex", Some("DE"), Some("US"), false),
            cfg.global_defaults.max_transit_days_international
        );
    }

    #[test]
    fn missing_country_codes_are_treated_as_domestic() {
        let cfg = config();
        assert_eq!(
            cfg.max_transit_days("aramex", None, None, false),
            cfg.global_defaults.max_transit_days_domestic
        );
    }

    #[test]
    fn delay_thresholds_project_global_defaults() {
        let cfg = config();
        let t = cfg.delay_thresholds();
        assert_eq!(t.warning_hours, cfg.global_defaults.warning_delay_hours);
        assert_eq!(t.breach_hours, cfg.global_defaults.breach_delay_hours);
        assert_eq!(
            t.customer_visible_hours,
            cfg.global_defaults.customer_visible_delay_hours
        );
        assert!(t.warning_hours <= t.breach_hours);
    }

    #[test]
    fn allowed_delay_hours_by_severity() {
        let cfg = config();
        assert_eq!(cfg.allowed_delay_hours(Severity::Low), 24.0);
        assert_eq!(cfg.allowed_delay_hours(Severity::Medium), 12.0);
        assert_eq!(cfg.allowed_delay_hours(Severity::High), 4.0);
    }
}
