//! # shipguard-policy
//!
//! The deterministic gate of the SHIPGUARD pipeline. Every candidate action
//! is re-derived from policy predicates alone — the audit agent's suggestion
//! is never taken on trust. The engine is side-effect-free: it reads its
//! context, returns a [`shipguard_contracts::action::PolicyCheckResult`],
//! and does nothing else.

pub mod engine;

pub use engine::SafeActionPolicy;
