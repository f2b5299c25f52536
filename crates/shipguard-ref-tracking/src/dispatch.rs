//! Mock action dispatcher.
//!
//! Stands in for the ticketing and notification systems. Side effects are
//! structured log events; ticket ids come from a per-dispatcher counter so
//! runs are reproducible.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use shipguard_contracts::{action::SafeAction, audit::AuditResult};
use shipguard_core::traits::ActionDispatcher;

/// An [`ActionDispatcher`] whose side effects are log lines.
///
/// In production these arms would call the ticketing API, the customer
/// messaging service, and the carrier API respectively.
#[derive(Debug, Default)]
pub struct LoggingDispatcher {
    ticket_counter: AtomicU64,
}

impl LoggingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ticket_id(&self, tracking_number: &str) -> String {
        let n = self.ticket_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let suffix: String = tracking_number
            .chars()
            .rev()
            .take(6)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("TKT-{n:04}-{suffix}")
    }
}

impl ActionDispatcher for LoggingDispatcher {
    fn dispatch(&self, action: SafeAction, audit: &AuditResult) {
        match action {
            SafeAction::CreateTicket => {
                let ticket_id = self.next_ticket_id(&audit.tracking_number);
                info!(
                    %ticket_id,
                    tracking_number = %audit.tracking_number,
                    courier_code = %audit.courier_code,
                    "[mock] ticket created"
                );
            }
            SafeAction::NotifyCustomer => {
                info!(
                    tracking_number = %audit.tracking_number,
                    "[mock] customer notified"
                );
            }
            SafeAction::NotifyVendor => {
                info!(
                    tracking_number = %audit.tracking_number,
                    courier_code = %audit.courier_code,
                    "[mock] vendor notified"
                );
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
