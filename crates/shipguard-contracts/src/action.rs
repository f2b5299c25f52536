//! Action types, the policy-check result, and per-action outcomes.
//!
//! The executable action set is a closed enum. The policy engine and the
//! executor both dispatch over it with exhaustive matches, so adding a new
//! action kind is a compile-time-checked change across both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::AuditResult;

/// The actions the audit agent may recommend to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    CreateTicket,
    NotifyCustomer,
    NotifyVendor,
    /// Nothing actionable — keep watching.
    Monitor,
}

/// The executable subset of [`SuggestedAction`].
///
/// `monitor` is advisory only and has no execution path, so it is excluded
/// here rather than filtered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeAction {
    CreateTicket,
    NotifyCustomer,
    NotifyVendor,
}

impl SafeAction {
    /// Map a suggestion to its executable form; `Monitor` maps to `None`.
    pub fn from_suggested(suggested: SuggestedAction) -> Option<Self> {
        match suggested {
            SuggestedAction::CreateTicket => Some(Self::CreateTicket),
            SuggestedAction::NotifyCustomer => Some(Self::NotifyCustomer),
            SuggestedAction::NotifyVendor => Some(Self::NotifyVendor),
            SuggestedAction::Monitor => None,
        }
    }

    /// The wire/log name of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateTicket => "create_ticket",
            Self::NotifyCustomer => "notify_customer",
            Self::NotifyVendor => "notify_vendor",
        }
    }
}

impl From<SafeAction> for SuggestedAction {
    fn from(action: SafeAction) -> Self {
        match action {
            SafeAction::CreateTicket => Self::CreateTicket,
            SafeAction::NotifyCustomer => Self::NotifyCustomer,
            SafeAction::NotifyVendor => Self::NotifyVendor,
        }
    }
}

/// The decision the policy engine produces for one candidate action.
///
/// `rule_evaluated` identifies the exact branch that fired and is populated
/// on every result — denials included — for audit traceability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCheckResult {
    pub allowed: bool,
    pub reason: String,
    pub rule_evaluated: String,
}

/// Everything the policy engine needs to decide on one action.
///
/// Built by the executor. The engine is a pure predicate of this context —
/// it performs no lookups of its own.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub audit: &'a AuditResult,
    /// How many of the courier's shipments currently exhibit a delay anomaly,
    /// counted at the same reference instant as the audit. `None` when the
    /// caller has no repeat-offense data.
    pub vendor_delay_count: Option<u32>,
}

/// The recorded outcome of one candidate action within one incident call.
///
/// A policy denial is a normal outcome, not an error: `denied` is set, the
/// reason is carried, and the action's side effect simply never ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub action: SafeAction,
    pub requested: bool,
    pub executed: bool,
    pub denied: bool,
    pub denial_reason: Option<String>,
    pub policy_check: PolicyCheckResult,
    pub timestamp: DateTime<Utc>,
}
