//! Hash-chain primitives for the decision log.
//!
//! Each retained decision commits to its predecessor through `prev_hash`,
//! making in-memory tampering detectable. Hash input layout (bytes, in
//! order):
//!
//!   1. sequence as 8-byte little-endian
//!   2. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   3. canonical JSON of the entry (serde_json, no pretty-printing)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use shipguard_contracts::decision::DecisionLogEntry;

/// The sentinel `prev_hash` for the first decision ever appended.
///
/// 64 hex zeros — never the SHA-256 of real data, so the chain origin is
/// unambiguous.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// One decision entry plus its position and hashes in the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainedDecision {
    /// Monotonically increasing position, starting at 1. Unlike the entry
    /// itself, the sequence survives eviction math: retained entries keep
    /// their original positions.
    pub sequence: u64,

    /// The sealed decision record.
    pub entry: DecisionLogEntry,

    /// Hash of the previous decision, or [`GENESIS_HASH`] for the first.
    /// After eviction the oldest retained entry keeps pointing at its
    /// (now evicted) predecessor.
    pub prev_hash: String,

    /// SHA-256 (hex) over this decision's canonical content.
    pub this_hash: String,
}

/// Compute the chain hash for one decision.
///
/// # Panics
///
/// Panics if `entry` cannot be serialized to JSON — which cannot happen for
/// the well-formed `DecisionLogEntry` type.
pub fn hash_entry(sequence: u64, prev_hash: &str, entry: &DecisionLogEntry) -> String {
    let entry_json =
        serde_json::to_vec(entry).expect("DecisionLogEntry must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&entry_json);

    hex::encode(hasher.finalize())
}

/// Verify the integrity of a retained window of the chain.
///
/// Two rules:
///
/// 1. **Linkage** — each decision's `prev_hash` equals the `this_hash` of
///    the decision before it. The first retained decision's `prev_hash` is
///    accepted as-is, since its predecessor may have been evicted.
/// 2. **Hash correctness** — each decision's `this_hash` matches the value
///    recomputed from its own fields.
///
/// Returns `false` the moment any mismatch is found. An empty window is
/// valid.
pub fn verify_window(decisions: &[ChainedDecision]) -> bool {
    for pair in decisions.windows(2) {
        if pair[1].prev_hash != pair[0].this_hash {
            return false;
        }
    }

    decisions
        .iter()
        .all(|d| hash_entry(d.sequence, &d.prev_hash, &d.entry) == d.this_hash)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use shipguard_contracts::{
        audit::{RiskLevel, SlaStatus, Verdict},
        decision::{DecisionDraft, DecisionSummary},
    };

    use super::*;

    fn entry(id: &str) -> DecisionLogEntry {
        DecisionLogEntry::seal(
            DecisionDraft {
                tracking_number: "TNT123456789".to_string(),
                courier_code: "tnt".to_string(),
                audit: DecisionSummary {
                    verdict: Verdict::Warning,
                    sla_status: SlaStatus::Warning,
                    risk_level: RiskLevel::Medium,
                    anomaly_score: 50,
                    anomaly_types: vec![],
                    delay_hours: Some(30.0),
                },
                requested_actions: vec![],
                outcomes: vec![],
                policy_rules_evaluated: vec![],
            },
            id.to_string(),
            Utc.with_ymd_and_hms(2024, 1, 25, 0, 0, 0).unwrap(),
        )
    }

    fn chain_of(n: u64) -> Vec<ChainedDecision> {
        let mut prev = GENESIS_HASH.to_string();
        (1..=n)
            .map(|seq| {
                let e = entry(&format!("dec-{seq:06}"));
                let this_hash = hash_entry(seq, &prev, &e);
                let link = ChainedDecision {
                    sequence: seq,
                    entry: e,
                    prev_hash: prev.clone(),
                    this_hash: this_hash.clone(),
                };
                prev = this_hash;
                link
            })
            .collect()
    }

    #[test]
    fn hash_is_deterministic_and_hex() {
        let e = entry("dec-000001");
        let first = hash_entry(1, GENESIS_HASH, &e);
        let second = hash_entry(1, GENESIS_HASH, &e);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_commits_to_sequence_and_prev() {
        let e = entry("dec-000001");
        let base = hash_entry(1, GENESIS_HASH, &e);
        assert_ne!(base, hash_entry(2, GENESIS_HASH, &e));
        assert_ne!(base, hash_entry(1, &"ab".repeat(32), &e));
    }

    #[test]
    fn empty_window_is_valid() {
        assert!(verify_window(&[]));
    }

    #[test]
    fn intact_chain_verifies() {
        assert!(verify_window(&chain_of(5)));
    }

    #[test]
    fn evicted_prefix_still_verifies() {
        // Simulate eviction by dropping the first two links.
        let chain = chain_of(5);
        assert!(verify_window(&chain[2..]));
    }

    #[test]
    fn tampered_entry_breaks_verification() {
        let mut chain = chain_of(3);
        chain[1].entry.courier_code = "dhl".to_string();
        assert!(!verify_window(&chain));
    }

    #[test]
    fn broken_linkage_breaks_verification() {
        let mut chain = chain_of(3);
        chain[2].prev_hash = GENESIS_HASH.to_string();
        assert!(!verify_window(&chain));
    }
}
