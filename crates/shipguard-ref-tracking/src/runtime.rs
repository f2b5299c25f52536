//! Pipeline wiring for the reference runtime.
//!
//! Assembles the audit agent, policy gate, logging dispatcher, and a bounded
//! decision log into one [`IncidentExecutor`], and exposes the three outward
//! interfaces: `audit`, `handle_incident`, and `last_decisions`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use shipguard_agent::AuditAgent;
use shipguard_audit::{InMemoryDecisionLog, DEFAULT_CAPACITY};
use shipguard_contracts::{
    audit::AuditResult, decision::DecisionLogEntry, error::ShipguardResult,
};
use shipguard_core::{IncidentExecutor, IncidentReport};
use shipguard_policy::SafeActionPolicy;
use shipguard_sla::{SlaConfig, SlaConfigStore};

use crate::dispatch::LoggingDispatcher;
use crate::store::MockShipmentStore;

/// The fully wired reference pipeline.
pub struct Runtime {
    executor: IncidentExecutor,
    log: Arc<InMemoryDecisionLog>,
    config: SlaConfig,
}

impl Runtime {
    /// Wire the pipeline over the reference fleet with the given SLA
    /// configuration and decision-log capacity.
    pub fn new(config_store: &SlaConfigStore, log_capacity: usize) -> Self {
        let config = config_store.config().clone();
        let store: Arc<MockShipmentStore> = Arc::new(MockShipmentStore::default());
        let log = Arc::new(InMemoryDecisionLog::new(log_capacity));

        let executor = IncidentExecutor::new(
            store.clone(),
            Box::new(AuditAgent::new(store, config.clone())),
            Box::new(SafeActionPolicy::new(config.delay_thresholds())),
            Box::new(LoggingDispatcher::new()),
            log.clone(),
        );

        Self {
            executor,
            log,
            config,
        }
    }

    /// The built-in configuration and the default log capacity.
    pub fn with_defaults() -> Self {
        Self::new(&SlaConfigStore::builtin(), DEFAULT_CAPACITY)
    }

    /// Audit one shipment without executing anything.
    pub fn audit(
        &self,
        tracking_number: &str,
        reference_time: Option<DateTime<Utc>>,
    ) -> ShipguardResult<AuditResult> {
        self.executor.audit(tracking_number, reference_time)
    }

    /// Run the full audit → policy → execute → record pipeline.
    pub fn handle_incident(
        &self,
        tracking_number: &str,
        reference_time: Option<DateTime<Utc>>,
    ) -> ShipguardResult<IncidentReport> {
        self.executor.handle_incident(tracking_number, reference_time)
    }

    /// The most recent `limit` decision records, most-recent-first.
    pub fn last_decisions(&self, limit: usize) -> Vec<DecisionLogEntry> {
        self.executor.last_decisions(limit)
    }

    /// Number of decisions currently retained.
    pub fn decision_count(&self) -> usize {
        self.log.len()
    }

    /// Verify the decision log's hash chain.
    pub fn verify_log_integrity(&self) -> bool {
        self.log.verify_integrity()
    }

    /// The SLA configuration the pipeline runs against.
    pub fn sla_config(&self) -> &SlaConfig {
        &self.config
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
