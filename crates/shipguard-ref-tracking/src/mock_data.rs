//! Simulated tracking data for the SHIPGUARD reference runtime.
//!
//! Five shipments, each exercising a distinct audit scenario:
//!
//! - `1Z999AA10123456784` — clean domestic delivery (UPS)
//! - `1234567890`         — international shipment with a customs delay (DHL)
//! - `FX9876543210`       — route deviation mid-transit (FedEx)
//! - `9405511899223197428490` — temperature-sensitive cargo with a cold-chain
//!   breach (USPS)
//! - `TNT123456789`       — stalled in transit, no updates for days (TNT)
//!
//! All data is hardcoded and fictional.

use chrono::{DateTime, Utc};

use shipguard_contracts::shipment::{Shipment, ShipmentStatus, TrackingEvent};

/// Parse a known-good fixture timestamp.
///
/// # Panics
///
/// Panics on a malformed literal — a defect in this file, not a runtime
/// condition.
fn ts(spec: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(spec)
        .expect("fixture timestamps must be valid RFC 3339")
        .with_timezone(&Utc)
}

#[allow(clippy::too_many_arguments)]
fn event(
    time: &str,
    detail: &str,
    location: &str,
    city: &str,
    state: Option<&str>,
    country: &str,
    country_name: &str,
    zip: &str,
) -> TrackingEvent {
    TrackingEvent {
        checkpoint_time: ts(time),
        tracking_detail: detail.to_string(),
        location: Some(location.to_string()),
        city: Some(city.to_string()),
        state: state.map(str::to_string),
        country: Some(country.to_string()),
        country_name: Some(country_name.to_string()),
        zip: Some(zip.to_string()),
    }
}

/// The full reference fleet.
pub fn sample_shipments() -> Vec<Shipment> {
    vec![
        // Clean domestic delivery.
        Shipment {
            id: "ship-1".to_string(),
            tracking_number: "1Z999AA10123456784".to_string(),
            courier_code: "ups".to_string(),
            title: Some("Electronics Package".to_string()),
            origin_country: Some("US".to_string()),
            destination_country: Some("US".to_string()),
            last_status: ShipmentStatus::Delivered,
            events: vec![
                event(
                    "2024-01-15T08:00:00Z",
                    "Shipment information received",
                    "New York Distribution Center",
                    "New York",
                    Some("NY"),
                    "US",
                    "United States",
                    "10001",
                ),
                event(
                    "2024-01-15T10:30:00Z",
                    "Picked up",
                    "New York Distribution Center",
                    "New York",
                    Some("NY"),
                    "US",
                    "United States",
                    "10001",
                ),
                event(
                    "2024-01-16T14:20:00Z",
                    "In transit",
                    "Philadelphia Hub",
                    "Philadelphia",
                    Some("PA"),
                    "US",
                    "United States",
                    "19101",
                ),
                event(
                    "2024-01-17T09:15:00Z",
                    "Out for delivery",
                    "Los Angeles Distribution Center",
                    "Los Angeles",
                    Some("CA"),
                    "US",
                    "United States",
                    "90001",
                ),
                event(
                    "2024-01-17T14:45:00Z",
                    "Delivered",
                    "Los Angeles",
                    "Los Angeles",
                    Some("CA"),
                    "US",
                    "United States",
                    "90001",
                ),
            ],
        },
        // International shipment held up in customs.
        Shipment {
            id: "ship-2".to_string(),
            tracking_number: "1234567890".to_string(),
            courier_code: "dhl".to_string(),
            title: Some("International Shipment".to_string()),
            origin_country: Some("GB".to_string()),
            destination_country: Some("US".to_string()),
            last_status: ShipmentStatus::InTransit,
            events: vec![
                event(
                    "2024-01-10T09:00:00Z",
                    "Shipment information received",
                    "London Hub",
                    "London",
                    None,
                    "GB",
                    "United Kingdom",
                    "SW1A 1AA",
                ),
                event(
                    "2024-01-10T12:30:00Z",
                    "Picked up",
                    "London Hub",
                    "London",
                    None,
                    "GB",
                    "United Kingdom",
                    "SW1A 1AA",
                ),
                event(
                    "2024-01-11T08:00:00Z",
                    "In transit to destination country",
                    "London Airport",
                    "London",
                    None,
                    "GB",
                    "United Kingdom",
                    "SW1A 1AA",
                ),
                event(
                    "2024-01-12T10:00:00Z",
                    "Arrived at destination country",
                    "New York JFK Airport",
                    "New York",
                    Some("NY"),
                    "US",
                    "United States",
                    "11430",
                ),
                event(
                    "2024-01-13T08:00:00Z",
                    "Customs clearance delay",
                    "New York Customs",
                    "New York",
                    Some("NY"),
                    "US",
                    "United States",
                    "11430",
                ),
                event(
                    "2024-01-15T11:00:00Z",
                    "Customs clearance completed",
                    "New York Customs",
                    "New York",
                    Some("NY"),
                    "US",
                    "United States",
                    "11430",
                ),
                event(
                    "2024-01-15T14:00:00Z",
                    "In transit to final destination",
                    "New York Distribution Center",
                    "New York",
                    Some("NY"),
                    "US",
                    "United States",
                    "10001",
                ),
            ],
        },
        // Route deviation mid-transit.
        Shipment {
            id: "ship-3".to_string(),
            tracking_number: "FX9876543210".to_string(),
            courier_code: "fedex".to_string(),
            title: Some("Express Delivery".to_string()),
            origin_country: Some("US".to_string()),
            destination_country: Some("US".to_string()),
            last_status: ShipmentStatus::InTransit,
            events: vec![
                event(
                    "2024-01-20T08:00:00Z",
                    "Shipment information received",
                    "Chicago Distribution Center",
                    "Chicago",
                    Some("IL"),
                    "US",
                    "United States",
                    "60601",
                ),
                event(
                    "2024-01-20T10:00:00Z",
                    "Picked up",
                    "Chicago Distribution Center",
                    "Chicago",
                    Some("IL"),
                    "US",
                    "United States",
                    "60601",
                ),
                event(
                    "2024-01-21T09:00:00Z",
                    "In transit",
                    "Detroit Hub",
                    "Detroit",
                    Some("MI"),
                    "US",
                    "United States",
                    "48201",
                ),
                event(
                    "2024-01-22T11:00:00Z",
                    "Unexpected route deviation - Package rerouted",
                    "Atlanta Hub",
                    "Atlanta",
                    Some("GA"),
                    "US",
                    "United States",
                    "30301",
                ),
                event(
                    "2024-01-23T08:00:00Z",
                    "Back on route",
                    "Miami Distribution Center",
                    "Miami",
                    Some("FL"),
                    "US",
                    "United States",
                    "33101",
                ),
            ],
        },
        // Temperature-sensitive cargo with a cold-chain breach.
        Shipment {
            id: "ship-4".to_string(),
            tracking_number: "9405511899223197428490".to_string(),
            courier_code: "usps".to_string(),
            title: Some("Temperature-Sensitive Package".to_string()),
            origin_country: Some("US".to_string()),
            destination_country: Some("US".to_string()),
            last_status: ShipmentStatus::InTransit,
            events: vec![
                event(
                    "2024-01-18T07:00:00Z",
                    "Pre-shipment info received",
                    "Phoenix Processing Center",
                    "Phoenix",
                    Some("AZ"),
                    "US",
                    "United States",
                    "85001",
                ),
                event(
                    "2024-01-18T10:00:00Z",
                    "Accepted at origin facility",
                    "Phoenix Processing Center",
                    "Phoenix",
                    Some("AZ"),
                    "US",
                    "United States",
                    "85001",
                ),
                event(
                    "2024-01-19T14:00:00Z",
                    "Temperature threshold exceeded - Cold chain breach detected",
                    "Las Vegas Processing Center",
                    "Las Vegas",
                    Some("NV"),
                    "US",
                    "United States",
                    "89101",
                ),
                event(
                    "2024-01-19T16:00:00Z",
                    "Package moved to temperature-controlled storage",
                    "Las Vegas Processing Center",
                    "Las Vegas",
                    Some("NV"),
                    "US",
                    "United States",
                    "89101",
                ),
                event(
                    "2024-01-20T09:00:00Z",
                    "In transit to destination",
                    "Las Vegas Processing Center",
                    "Las Vegas",
                    Some("NV"),
                    "US",
                    "United States",
                    "89101",
                ),
            ],
        },
        // Stalled in transit.
        Shipment {
            id: "ship-5".to_string(),
            tracking_number: "TNT123456789".to_string(),
            courier_code: "tnt".to_string(),
            title: Some("European Shipment".to_string()),
            origin_country: Some("NL".to_string()),
            destination_country: Some("FR".to_string()),
            last_status: ShipmentStatus::Exception,
            events: vec![
                event(
                    "2024-01-05T08:00:00Z",
                    "Shipment collected",
                    "Amsterdam Hub",
                    "Amsterdam",
                    None,
                    "NL",
                    "Netherlands",
                    "1012 AB",
                ),
                event(
                    "2024-01-06T10:00:00Z",
                    "In transit",
                    "Amsterdam Hub",
                    "Amsterdam",
                    None,
                    "NL",
                    "Netherlands",
                    "1012 AB",
                ),
                event(
                    "2024-01-08T14:00:00Z",
                    "Arrived at transit facility",
                    "Paris Hub",
                    "Paris",
                    None,
                    "FR",
                    "France",
                    "75001",
                ),
                event(
                    "2024-01-10T09:00:00Z",
                    "In transit - no movement reported",
                    "Paris Hub",
                    "Paris",
                    None,
                    "FR",
                    "France",
                    "75001",
                ),
            ],
        },
    ]
}
