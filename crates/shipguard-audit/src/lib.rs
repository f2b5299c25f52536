//! # shipguard-audit
//!
//! The decision log: an append-only, size-bounded, SHA-256 hash-chained
//! record of every end-to-end incident handling call.
//!
//! The log is process-lifetime state with **no persistence across
//! restarts** — a deliberate choice. The audit trail serves the current
//! session; it is not long-term compliance storage, and callers expecting
//! durability must provide their own sink.
//!
//! Construct with an explicit capacity and inject where needed; there is no
//! implicit singleton.

pub mod chain;
pub mod log;

pub use log::{InMemoryDecisionLog, DEFAULT_CAPACITY};
