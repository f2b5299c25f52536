//! The bounded in-memory decision log.
//!
//! A `VecDeque` of chained decisions behind a single `Mutex`. The mutex
//! serializes appends, which is what keeps ids unique and the FIFO bound
//! intact under concurrent use; reads take a stable snapshot under the same
//! lock.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;
use tracing::info;

use shipguard_contracts::{
    decision::{DecisionDraft, DecisionLogEntry},
    error::{ShipguardError, ShipguardResult},
};
use shipguard_core::traits::DecisionStore;

use crate::chain::{hash_entry, verify_window, ChainedDecision, GENESIS_HASH};

/// Capacity used by the reference runtime.
pub const DEFAULT_CAPACITY: usize = 100;

// ── Internal mutable state ────────────────────────────────────────────────────

struct LogState {
    /// Retained decisions in append order, oldest first.
    entries: VecDeque<ChainedDecision>,

    /// The sequence number the next append will receive (starts at 1).
    next_sequence: u64,

    /// The `this_hash` of the last appended decision, or [`GENESIS_HASH`]
    /// before any append.
    last_hash: String,
}

// ── Public log ────────────────────────────────────────────────────────────────

/// An append-only, size-bounded decision log.
///
/// Ids are monotonically increasing and unique for the lifetime of the log
/// instance. Once more than `capacity` decisions have been appended, the
/// oldest is evicted — strictly FIFO.
///
/// # Thread safety
///
/// All operations acquire the internal mutex; concurrent appends cannot
/// interleave, duplicate ids, or corrupt the bound.
///
/// # Durability
///
/// None. The log lives and dies with the process.
pub struct InMemoryDecisionLog {
    capacity: usize,
    state: Mutex<LogState>,
}

impl InMemoryDecisionLog {
    /// Create a log bounded to `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(LogState {
                entries: VecDeque::new(),
                next_sequence: 1,
                last_hash: GENESIS_HASH.to_string(),
            }),
        }
    }

    /// All retained decisions in append order, oldest first.
    pub fn entries(&self) -> Vec<DecisionLogEntry> {
        let state = self.state.lock().expect("decision log lock poisoned");
        state.entries.iter().map(|d| d.entry.clone()).collect()
    }

    /// Number of retained decisions.
    pub fn len(&self) -> usize {
        let state = self.state.lock().expect("decision log lock poisoned");
        state.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify that the retained window has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("decision log lock poisoned");
        let window: Vec<ChainedDecision> = state.entries.iter().cloned().collect();
        verify_window(&window)
    }
}

impl DecisionStore for InMemoryDecisionLog {
    /// Seal the draft and append it to the chain.
    ///
    /// Assigns the next sequence id (`dec-<sequence>`, zero-padded) and the
    /// current UTC timestamp, computes the chain hash, appends, and evicts
    /// the oldest decision if the bound is now exceeded.
    ///
    /// Returns `Err(LogWriteFailed)` only if the internal mutex is poisoned,
    /// which cannot happen under normal operation.
    fn append(&self, draft: DecisionDraft) -> ShipguardResult<DecisionLogEntry> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| ShipguardError::LogWriteFailed {
                reason: format!("decision log lock poisoned: {e}"),
            })?;

        let sequence = state.next_sequence;
        let entry = DecisionLogEntry::seal(draft, format!("dec-{sequence:06}"), Utc::now());
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_entry(sequence, &prev_hash, &entry);

        state.entries.push_back(ChainedDecision {
            sequence,
            entry: entry.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.next_sequence += 1;
        state.last_hash = this_hash;

        if state.entries.len() > self.capacity {
            let evicted = state.entries.pop_front();
            if let Some(evicted) = evicted {
                info!(
                    evicted_id = %evicted.entry.id,
                    capacity = self.capacity,
                    "decision log at capacity, oldest entry evicted"
                );
            }
        }

        info!(
            decision_id = %entry.id,
            tracking_number = %entry.tracking_number,
            retained = state.entries.len(),
            "decision recorded"
        );

        Ok(entry)
    }

    /// The most recent `limit` decisions, most-recent-first, clamped to what
    /// is retained.
    fn last_n(&self, limit: usize) -> Vec<DecisionLogEntry> {
        let state = self.state.lock().expect("decision log lock poisoned");
        state
            .entries
            .iter()
            .rev()
            .take(limit)
            .map(|d| d.entry.clone())
            .collect()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
