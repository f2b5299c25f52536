//! In-memory shipment store over the reference fleet.

use shipguard_contracts::shipment::Shipment;
use shipguard_core::traits::ShipmentStore;

use crate::mock_data::sample_shipments;

/// A [`ShipmentStore`] backed by the hardcoded reference fleet.
pub struct MockShipmentStore {
    shipments: Vec<Shipment>,
}

impl MockShipmentStore {
    /// A store over an arbitrary fleet (used by tests).
    pub fn with_fleet(shipments: Vec<Shipment>) -> Self {
        Self { shipments }
    }

    /// Every shipment in the fleet.
    pub fn all(&self) -> Vec<Shipment> {
        self.shipments.clone()
    }

    /// Shipments whose tracking number contains `query`, case-insensitively.
    /// An empty query returns the whole fleet.
    pub fn search(&self, query: &str) -> Vec<Shipment> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return self.all();
        }
        self.shipments
            .iter()
            .filter(|s| s.tracking_number.to_uppercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Default for MockShipmentStore {
    fn default() -> Self {
        Self::with_fleet(sample_shipments())
    }
}

impl ShipmentStore for MockShipmentStore {
    fn resolve(&self, tracking_number: &str) -> Option<Shipment> {
        let needle = tracking_number.trim();
        self.shipments
            .iter()
            .find(|s| s.tracking_number.eq_ignore_ascii_case(needle))
            .cloned()
    }

    fn by_courier(&self, courier_code: &str) -> Vec<Shipment> {
        self.shipments
            .iter()
            .filter(|s| s.courier_code.eq_ignore_ascii_case(courier_code))
            .cloned()
            .collect()
    }

    fn sample_tracking_numbers(&self) -> Vec<String> {
        self.shipments
            .iter()
            .map(|s| s.tracking_number.clone())
            .collect()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_exact_trimmed_and_case_insensitive() {
        let store = MockShipmentStore::default();
        assert!(store.resolve("FX9876543210").is_some());
        assert!(store.resolve("  fx9876543210  ").is_some());
        // Partial identifiers do not resolve.
        assert!(store.resolve("FX98765").is_none());
        assert!(store.resolve("DOES-NOT-EXIST").is_none());
    }

    #[test]
    fn search_matches_partial_tracking_numbers() {
        let store = MockShipmentStore::default();
        let hits = store.search("fx98");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tracking_number, "FX9876543210");

        assert_eq!(store.search("").len(), store.all().len());
        assert!(store.search("zzz").is_empty());
    }

    #[test]
    fn by_courier_ignores_case() {
        let store = MockShipmentStore::default();
        assert_eq!(store.by_courier("UPS").len(), 1);
        assert_eq!(store.by_courier("ups").len(), 1);
        assert!(store.by_courier("dpd").is_empty());
    }

    #[test]
    fn sample_tracking_numbers_cover_the_fleet() {
        let store = MockShipmentStore::default();
        let samples = store.sample_tracking_numbers();
        assert_eq!(samples.len(), 5);
        assert!(samples.contains(&"TNT123456789".to_string()));
    }
}
